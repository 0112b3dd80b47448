use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while crawling and exporting bulletins
#[derive(Debug, Error)]
pub enum CrawlError {
    /// No WebDriver endpoint accepted a new session
    #[error("could not start a WebDriver session (tried: {})", .tried.join(", "))]
    SessionUnavailable { tried: Vec<String> },

    /// Navigating to a page failed
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Reading the rendered markup back from the browser failed
    #[error("could not read markup for {url}: {reason}")]
    Markup { url: String, reason: String },

    /// The configuration file could not be read
    #[error("could not read config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for `CrawlConfig`
    #[error("invalid configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    /// The seed URL does not parse
    #[error("invalid seed URL: {0}")]
    InvalidSeed(#[from] url::ParseError),

    #[error("failed to write CSV export: {0}")]
    Export(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
