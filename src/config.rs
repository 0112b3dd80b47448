use crate::error::CrawlError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// First bulletin of the chain the crawl starts from
pub const DEFAULT_SEED_URL: &str = "https://www.zsu.gov.ua/news/operatyvna-informatsiia-stanom-na-0800-20102025-shchodo-rosiiskoho-vtorhnennia";

/// Configuration for a bulletin crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL to start crawling from
    #[serde(default = "default_seed_url")]
    pub seed_url: String,

    /// Number of records to keep in the export
    #[serde(default = "default_target_count")]
    pub target_count: usize,

    /// Maximum number of pages to visit (defaults to twice the target count)
    #[serde(default)]
    pub safety_cap: Option<usize>,

    /// Seconds to wait for the page body before reading markup anyway
    #[serde(default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: f64,

    /// Lower bound of the pause between fetches, in seconds
    #[serde(default = "default_min_delay_secs")]
    pub min_delay_secs: f64,

    /// Upper bound of the pause between fetches, in seconds
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: f64,

    /// Substrings a link must contain to be followed
    #[serde(default = "default_link_fragments")]
    pub link_fragments: Vec<String>,

    /// Directory the CSV export is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Browser session settings
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Settings for the WebDriver-controlled browser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run Chrome without a visible window
    #[serde(default)]
    pub headless: bool,

    /// Window size passed as `--window-size`
    #[serde(default = "default_window_size")]
    pub window_size: String,

    /// Interface language passed as `--lang`
    #[serde(default = "default_lang")]
    pub lang: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Chrome profile directory to reuse between runs
    #[serde(default)]
    pub user_data_dir: Option<String>,

    /// Proxy passed as `--proxy-server`
    #[serde(default)]
    pub proxy: Option<String>,
}

fn default_seed_url() -> String {
    DEFAULT_SEED_URL.to_string()
}

fn default_target_count() -> usize {
    30
}

fn default_ready_timeout_secs() -> f64 {
    10.0
}

fn default_min_delay_secs() -> f64 {
    1.2
}

fn default_max_delay_secs() -> f64 {
    3.0
}

fn default_link_fragments() -> Vec<String> {
    vec![
        "operatyvna-informatsiia".to_string(),
        "shchodo-rosiiskoho-vtorhnennia".to_string(),
    ]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_window_size() -> String {
    "1200,2000".to_string()
}

fn default_lang() -> String {
    "uk-UA".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: false,
            window_size: default_window_size(),
            lang: default_lang(),
            user_agent: default_user_agent(),
            user_data_dir: None,
            proxy: None,
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_URL)
    }
}

impl CrawlConfig {
    /// Create a new configuration with default values
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            target_count: default_target_count(),
            safety_cap: None,
            ready_timeout_secs: default_ready_timeout_secs(),
            min_delay_secs: default_min_delay_secs(),
            max_delay_secs: default_max_delay_secs(),
            link_fragments: default_link_fragments(),
            output_dir: default_output_dir(),
            browser: BrowserConfig::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CrawlError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CrawlError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CrawlError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override the WebDriver URL from `WEBDRIVER_URL` when it is set and non-empty
    pub fn apply_env_overrides(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.browser.webdriver_url = webdriver_url;
            }
        }
    }

    /// Hard limit on visited pages
    pub fn effective_safety_cap(&self) -> usize {
        self.safety_cap
            .unwrap_or_else(|| self.target_count.saturating_mul(2))
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.ready_timeout_secs.max(0.0))
            .unwrap_or_else(|_| Duration::from_secs_f64(default_ready_timeout_secs()))
    }

    /// Pause bounds in seconds, clamped to be non-negative and ordered
    ///
    /// A bound too large to be a `Duration` falls back to its default.
    pub fn delay_range(&self) -> (f64, f64) {
        let min = representable_secs(self.min_delay_secs).unwrap_or_else(default_min_delay_secs);
        let max = representable_secs(self.max_delay_secs)
            .unwrap_or_else(default_max_delay_secs)
            .max(min);
        (min, max)
    }
}

fn representable_secs(secs: f64) -> Option<f64> {
    let secs = secs.max(0.0);
    Duration::try_from_secs_f64(secs).ok().map(|_| secs)
}
