use crate::error::CrawlError;
use async_trait::async_trait;
use std::time::Duration;

/// A live browser the crawl drives one page at a time
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate to a URL
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlError>;

    /// Wait until the document body is present; `false` when the wait timed out
    async fn wait_for_ready(&mut self, timeout: Duration) -> bool;

    /// Markup of the current page as rendered by the browser
    async fn rendered_markup(&mut self) -> Result<String, CrawlError>;

    /// End the session; failures are logged, not returned
    async fn terminate(&mut self);
}

/// Loads a page and returns its rendered markup, or `None` if the URL should be skipped
pub async fn fetch_page<S>(session: &mut S, url: &str, ready_timeout: Duration) -> Option<String>
where
    S: BrowserSession + ?Sized,
{
    if let Err(e) = session.navigate(url).await {
        ::log::warn!("Skipping {}: {}", url, e);
        return None;
    }

    if !session.wait_for_ready(ready_timeout).await {
        ::log::debug!(
            "Page body not ready after {:.1}s, reading markup anyway: {}",
            ready_timeout.as_secs_f64(),
            url
        );
    }

    match session.rendered_markup().await {
        Ok(markup) => Some(markup),
        Err(e) => {
            ::log::warn!("Skipping {}: {}", url, e);
            None
        }
    }
}
