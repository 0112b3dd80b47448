// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod export;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::CrawlConfig;
pub use crawlers::{BrowserSession, WebDriverSession};
pub use error::CrawlError;
pub use results::PageRecord;

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use url::Url;

/// Builder for a bulletin crawl and its CSV export
#[derive(Debug, Clone)]
pub struct Briefs {
    config: CrawlConfig,
}

impl Default for Briefs {
    fn default() -> Self {
        Self::new(config::DEFAULT_SEED_URL)
    }
}

impl Briefs {
    /// Create a new builder starting from the given bulletin URL
    pub fn new(seed_url: &str) -> Self {
        Self {
            config: CrawlConfig::new(seed_url),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, CrawlError> {
        let config = CrawlConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    pub fn with_seed_url(mut self, seed_url: &str) -> Self {
        self.config.seed_url = seed_url.to_string();
        self
    }

    /// Set how many records the export keeps
    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.config.target_count = target_count;
        self
    }

    /// Set the maximum number of pages visited
    pub fn with_safety_cap(mut self, safety_cap: usize) -> Self {
        self.config.safety_cap = Some(safety_cap);
        self
    }

    /// Set the pause range between fetches, in seconds
    pub fn with_delay_range(mut self, min_secs: f64, max_secs: f64) -> Self {
        self.config.min_delay_secs = min_secs;
        self.config.max_delay_secs = max_secs;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.config.browser.webdriver_url = webdriver_url.to_string();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.browser.headless = headless;
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawl through an existing session and return the aggregated records
    ///
    /// The session is left open; terminating it is the caller's job.
    pub async fn collect<S>(&self, session: &mut S) -> Result<Vec<PageRecord>, CrawlError>
    where
        S: BrowserSession + ?Sized,
    {
        Url::parse(&self.config.seed_url)?;
        let records = crawlers::crawl(session, &self.config).await;
        Ok(export::aggregate(&records, self.config.target_count))
    }

    /// Crawl through `session`, terminate it, then write the CSV export
    ///
    /// The session is terminated even if the crawl fails or panics.
    pub async fn run_with_session<S>(&self, session: &mut S) -> Result<PathBuf, CrawlError>
    where
        S: BrowserSession + ?Sized,
    {
        let outcome = AssertUnwindSafe(self.collect(session)).catch_unwind().await;
        session.terminate().await;

        let records = match outcome {
            Ok(records) => records?,
            Err(panic) => std::panic::resume_unwind(panic),
        };

        export::export_to_dir(&self.config.output_dir, &records, self.config.target_count)
    }

    /// Open a WebDriver session, crawl, and write the CSV export
    pub async fn run(self) -> Result<PathBuf, CrawlError> {
        let mut session = WebDriverSession::connect(&self.config.browser).await?;
        self.run_with_session(&mut session).await
    }
}
