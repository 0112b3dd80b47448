use crate::config::BrowserConfig;
use crate::crawlers::crawler::BrowserSession;
use crate::error::CrawlError;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Endpoints tried when the configured WebDriver URL refuses a session
const FALLBACK_WEBDRIVER_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
    "http://localhost:4444",
];

/// Browser session backed by a WebDriver server
pub struct WebDriverSession {
    client: Option<Client>,
    current_url: String,
}

impl WebDriverSession {
    /// Connects to the configured WebDriver, falling back to common local endpoints
    pub async fn connect(config: &BrowserConfig) -> Result<Self, CrawlError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(chrome_capabilities(config));

        let mut tried = Vec::new();
        let candidates = std::iter::once(config.webdriver_url.as_str()).chain(
            FALLBACK_WEBDRIVER_URLS
                .iter()
                .copied()
                .filter(|url| *url != config.webdriver_url),
        );

        for url in candidates {
            if !tried.is_empty() {
                ::log::debug!("Trying fallback WebDriver URL: {}", url);
            }
            match builder.connect(url).await {
                Ok(client) => {
                    ::log::info!("Connected to WebDriver at {}", url);
                    return Ok(Self {
                        client: Some(client),
                        current_url: String::new(),
                    });
                }
                Err(e) => {
                    ::log::debug!("WebDriver at {} refused a session: {}", url, e);
                    tried.push(url.to_string());
                }
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(CrawlError::SessionUnavailable { tried })
    }

    fn client(&self) -> Result<&Client, String> {
        self.client
            .as_ref()
            .ok_or_else(|| "session already terminated".to_string())
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlError> {
        self.current_url = url.to_string();
        let navigation = match self.client() {
            Ok(client) => client.goto(url).await.map_err(|e| e.to_string()),
            Err(reason) => Err(reason),
        };
        navigation.map_err(|reason| CrawlError::Navigation {
            url: url.to_string(),
            reason,
        })
    }

    async fn wait_for_ready(&mut self, timeout: Duration) -> bool {
        let Ok(client) = self.client() else {
            return false;
        };
        client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css("body"))
            .await
            .is_ok()
    }

    async fn rendered_markup(&mut self) -> Result<String, CrawlError> {
        let source = match self.client() {
            Ok(client) => client.source().await.map_err(|e| e.to_string()),
            Err(reason) => Err(reason),
        };
        source.map_err(|reason| CrawlError::Markup {
            url: self.current_url.clone(),
            reason,
        })
    }

    async fn terminate(&mut self) {
        if let Some(client) = self.client.take() {
            match client.close().await {
                Ok(()) => ::log::debug!("WebDriver session closed"),
                Err(e) => ::log::warn!("Failed to close WebDriver session: {}", e),
            }
        }
    }
}

/// Chrome capabilities for the configured window, language, user agent and profile
pub fn chrome_capabilities(config: &BrowserConfig) -> Map<String, Value> {
    let mut args = vec![
        format!("--window-size={}", config.window_size),
        format!("--lang={}", config.lang),
        format!("--user-agent={}", config.user_agent),
    ];
    if config.headless {
        args.push("--headless=new".to_string());
    }
    if let Some(dir) = &config.user_data_dir {
        args.push(format!("--user-data-dir={}", dir));
    }
    if let Some(proxy) = &config.proxy {
        args.push(format!("--proxy-server={}", proxy));
    }

    let mut caps = Map::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome_args(caps: &Map<String, Value>) -> Vec<String> {
        caps["goog:chromeOptions"]["args"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_default_capabilities() {
        let caps = chrome_capabilities(&BrowserConfig::default());
        assert_eq!(caps["browserName"], "chrome");

        let args = chrome_args(&caps);
        assert!(args.contains(&"--window-size=1200,2000".to_string()));
        assert!(args.contains(&"--lang=uk-UA".to_string()));
        assert!(args.iter().any(|a| a.starts_with("--user-agent=Mozilla/5.0")));
        assert!(!args.iter().any(|a| a.starts_with("--headless")));
    }

    #[test]
    fn test_optional_switches() {
        let config = BrowserConfig {
            headless: true,
            user_data_dir: Some("/tmp/profile".to_string()),
            proxy: Some("socks5://127.0.0.1:9050".to_string()),
            ..BrowserConfig::default()
        };
        let args = chrome_args(&chrome_capabilities(&config));
        assert!(args.contains(&"--headless=new".to_string()));
        assert!(args.contains(&"--user-data-dir=/tmp/profile".to_string()));
        assert!(args.contains(&"--proxy-server=socks5://127.0.0.1:9050".to_string()));
    }
}
