use crate::config::CrawlConfig;
use crate::crawlers::crawler::{BrowserSession, fetch_page};
use crate::filter::LinkFilter;
use crate::parsers::{date, parse_article};
use crate::results::PageRecord;
use crate::utils::jittered_delay;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Breadth-first crawl state: URLs waiting in FIFO order and URLs already fetched
///
/// A URL is never in both sets, and once visited it is never queued again.
#[derive(Debug, Default)]
pub struct Frontier {
    visited: HashSet<String>,
    pending: VecDeque<String>,
    queued: HashSet<String>,
}

impl Frontier {
    /// Frontier holding only the seed URL
    pub fn new(seed: &str) -> Self {
        let mut frontier = Self::default();
        frontier.enqueue(seed.to_string());
        frontier
    }

    /// Queues a URL unless it was visited or is already waiting; returns whether it was queued
    pub fn enqueue(&mut self, url: String) -> bool {
        if self.visited.contains(&url) || self.queued.contains(&url) {
            ::log::trace!("Skipping already visited or queued link: {}", url);
            return false;
        }
        ::log::trace!("Queuing link for crawling: {}", url);
        self.queued.insert(url.clone());
        self.pending.push_back(url);
        true
    }

    /// Pops the oldest pending URL and marks it visited
    pub fn next_url(&mut self) -> Option<String> {
        while let Some(url) = self.pending.pop_front() {
            self.queued.remove(&url);
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Crawls the bulletin chain from the configured seed and returns records in visit order
///
/// Stops when nothing is pending, when `target_count` records were collected,
/// or when the safety cap of visited pages is reached. Pages that fail to
/// load stay visited and produce no record.
pub async fn crawl<S>(session: &mut S, config: &CrawlConfig) -> Vec<PageRecord>
where
    S: BrowserSession + ?Sized,
{
    let target_count = config.target_count;
    let safety_cap = config.effective_safety_cap();
    let ready_timeout = config.ready_timeout();
    let (min_delay, max_delay) = config.delay_range();
    let filter = LinkFilter::new(config.link_fragments.clone());

    ::log::info!(
        "Starting crawl at {} (target {}, cap {})",
        config.seed_url,
        target_count,
        safety_cap
    );

    // Discovered links are serialized by `Url`, so the seed must be too
    let seed = match Url::parse(&config.seed_url) {
        Ok(url) => url.to_string(),
        Err(e) => {
            ::log::warn!("Seed URL {} does not parse: {}", config.seed_url, e);
            config.seed_url.clone()
        }
    };
    let mut frontier = Frontier::new(&seed);
    let mut records = Vec::new();

    while frontier.has_pending()
        && records.len() < target_count
        && frontier.visited_count() < safety_cap
    {
        let Some(url) = frontier.next_url() else {
            break;
        };

        if frontier.visited_count() > 1 {
            let delay = jittered_delay(min_delay, max_delay);
            ::log::debug!("Pausing {:.2}s before {}", delay.as_secs_f64(), url);
            tokio::time::sleep(delay).await;
        }

        let Some(markup) = fetch_page(session, &url, ready_timeout).await else {
            continue;
        };

        let article = parse_article(&markup, &url, &filter);
        let date = date::extract_date(&article.title);
        ::log::info!(
            "Fetched {} (date: {})",
            url,
            date.map(|d| d.to_string())
                .unwrap_or_else(|| "no-date".to_string())
        );

        let discovered = article.related_links.len();
        let mut queued = 0;
        for link in article.related_links {
            if frontier.enqueue(link) {
                queued += 1;
            }
        }
        ::log::debug!(
            "Queued {} of {} related links from {}",
            queued,
            discovered,
            url
        );

        records.push(PageRecord::new(url, article.title, article.body_text, date));
    }

    ::log::info!(
        "Crawl finished: {} records, {} pages visited, {} still pending",
        records.len(),
        frontier.visited_count(),
        frontier.pending_count()
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrawlError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    const BASE: &str = "https://www.zsu.gov.ua/news/";

    fn bulletin_url(slug: &str) -> String {
        format!(
            "{}operatyvna-informatsiia-{}-shchodo-rosiiskoho-vtorhnennia",
            BASE, slug
        )
    }

    fn bulletin_page(title: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|slug| format!(r#"<a href="{}">link</a>"#, bulletin_url(slug)))
            .collect();
        format!(
            "<html><body><h1>{}</h1><main><article><p>Body of {}</p></article></main>{}</body></html>",
            title, title, anchors
        )
    }

    /// Serves canned markup and records every navigation
    #[derive(Default)]
    struct CannedSession {
        pages: HashMap<String, String>,
        navigations: Vec<String>,
        current: Option<String>,
    }

    impl CannedSession {
        fn with_page(mut self, slug: &str, title: &str, links: &[&str]) -> Self {
            self.pages
                .insert(bulletin_url(slug), bulletin_page(title, links));
            self
        }
    }

    #[async_trait]
    impl BrowserSession for CannedSession {
        async fn navigate(&mut self, url: &str) -> Result<(), CrawlError> {
            self.navigations.push(url.to_string());
            if self.pages.contains_key(url) {
                self.current = Some(url.to_string());
                Ok(())
            } else {
                Err(CrawlError::Navigation {
                    url: url.to_string(),
                    reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
                })
            }
        }

        async fn wait_for_ready(&mut self, _timeout: Duration) -> bool {
            true
        }

        async fn rendered_markup(&mut self) -> Result<String, CrawlError> {
            let url = self.current.clone().unwrap_or_default();
            Ok(self.pages.get(&url).cloned().unwrap_or_default())
        }

        async fn terminate(&mut self) {}
    }

    fn test_config(seed_slug: &str, target_count: usize) -> CrawlConfig {
        let mut config = CrawlConfig::new(&bulletin_url(seed_slug));
        config.target_count = target_count;
        config.min_delay_secs = 0.0;
        config.max_delay_secs = 0.0;
        config
    }

    #[test]
    fn test_frontier_is_fifo() {
        let mut frontier = Frontier::new("a");
        assert_eq!(frontier.next_url().as_deref(), Some("a"));
        frontier.enqueue("b".to_string());
        frontier.enqueue("c".to_string());
        assert_eq!(frontier.next_url().as_deref(), Some("b"));
        assert_eq!(frontier.next_url().as_deref(), Some("c"));
        assert_eq!(frontier.next_url(), None);
    }

    #[test]
    fn test_frontier_rejects_visited_and_pending() {
        let mut frontier = Frontier::new("a");
        assert!(!frontier.enqueue("a".to_string()), "already pending");

        frontier.next_url();
        assert!(frontier.is_visited("a"));
        assert!(!frontier.enqueue("a".to_string()), "already visited");

        assert!(frontier.enqueue("b".to_string()));
        assert!(!frontier.enqueue("b".to_string()));
        assert_eq!(frontier.pending_count(), 1);
        assert_eq!(frontier.visited_count(), 1);
    }

    #[tokio::test]
    async fn test_visits_each_page_once() {
        // Every page links to every other page
        let all = ["d20", "d19", "d18"];
        let mut session = CannedSession::default()
            .with_page("d20", "Станом на 20.10.2025", &all)
            .with_page("d19", "Станом на 19.10.2025", &all)
            .with_page("d18", "Станом на 18.10.2025", &all);

        let records = crawl(&mut session, &test_config("d20", 30)).await;

        assert_eq!(records.len(), 3);
        assert_eq!(session.navigations.len(), 3);
        let unique: HashSet<_> = session.navigations.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[tokio::test]
    async fn test_breadth_first_order() {
        let mut session = CannedSession::default()
            .with_page("root", "root", &["a", "b"])
            .with_page("a", "a", &["a1"])
            .with_page("b", "b", &["b1"])
            .with_page("a1", "a1", &[])
            .with_page("b1", "b1", &[]);

        crawl(&mut session, &test_config("root", 30)).await;

        let order: Vec<String> = ["root", "a", "b", "a1", "b1"]
            .iter()
            .map(|slug| bulletin_url(slug))
            .collect();
        assert_eq!(session.navigations, order);
    }

    #[tokio::test]
    async fn test_stops_at_target_count() {
        let mut session = CannedSession::default()
            .with_page("p0", "p0", &["p1", "p2", "p3"])
            .with_page("p1", "p1", &[])
            .with_page("p2", "p2", &[])
            .with_page("p3", "p3", &[]);

        let records = crawl(&mut session, &test_config("p0", 2)).await;

        assert_eq!(records.len(), 2);
        assert_eq!(session.navigations.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_visited_but_not_recorded() {
        let mut session = CannedSession::default()
            .with_page("seed", "seed", &["missing", "present"])
            .with_page("present", "present", &["missing"]);

        let records = crawl(&mut session, &test_config("seed", 30)).await;

        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec![bulletin_url("seed"), bulletin_url("present")]);
        // "missing" was attempted once and never retried
        let attempts = session
            .navigations
            .iter()
            .filter(|u| **u == bulletin_url("missing"))
            .count();
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn test_safety_cap_bounds_visits() {
        // Only the seed resolves; every other page fails and yields no record
        let links = ["x1", "x2", "x3", "x4", "x5"];
        let mut session = CannedSession::default().with_page("seed", "seed", &links);
        let mut config = test_config("seed", 30);
        config.safety_cap = Some(3);

        let records = crawl(&mut session, &config).await;

        assert_eq!(records.len(), 1);
        assert_eq!(session.navigations.len(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_seed_yields_nothing() {
        let mut session = CannedSession::default();
        let records = crawl(&mut session, &test_config("gone", 30)).await;
        assert!(records.is_empty());
        assert_eq!(session.navigations.len(), 1);
    }

    #[tokio::test]
    async fn test_seed_is_not_revisited_through_its_canonical_form() {
        let raw_seed = bulletin_url("дата");
        let canonical = Url::parse(&raw_seed).unwrap().to_string();
        assert_ne!(raw_seed, canonical);

        let page = format!(
            r#"<html><body><h1>Станом на 20.10.2025</h1><a href="{}">self</a></body></html>"#,
            raw_seed
        );
        let mut session = CannedSession::default();
        session.pages.insert(canonical.clone(), page);

        let mut config = test_config("дата", 30);
        config.seed_url = raw_seed;
        let records = crawl(&mut session, &config).await;

        assert_eq!(session.navigations, vec![canonical.clone()]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, canonical);
    }

    #[tokio::test]
    async fn test_records_carry_title_body_and_date() {
        let mut session = CannedSession::default().with_page(
            "d20",
            "Оперативна інформація станом на 08:00 20.10.2025",
            &[],
        );

        let records = crawl(&mut session, &test_config("d20", 30)).await;

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.url, bulletin_url("d20"));
        assert_eq!(
            record.title,
            "Оперативна інформація станом на 08:00 20.10.2025"
        );
        assert_eq!(
            record.body_text,
            "Body of Оперативна інформація станом на 08:00 20.10.2025"
        );
        assert_eq!(record.date_slug(), "2025-10-20");
    }
}
