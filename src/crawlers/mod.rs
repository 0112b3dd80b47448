pub mod crawler;
pub mod frontier;
pub mod web;

pub use crawler::{BrowserSession, fetch_page};
pub use frontier::{Frontier, crawl};
pub use web::WebDriverSession;
