use crate::filter::LinkFilter;
use crate::parsers::{ParsedArticle, text};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h1, h2"));
static MAIN: LazyLock<Selector> = LazyLock::new(|| selector("main"));
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| selector("article"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector")
}

/// Parses a rendered bulletin page into title, body and follow-up links
pub fn parse(html: &str, source_url: &str, filter: &LinkFilter) -> ParsedArticle {
    let doc = Html::parse_document(html);

    let title = extract_title(&doc);
    let body_text = text::clean_body(&extract_body(&doc));

    let related_links = match Url::parse(source_url) {
        Ok(base) => filter.select_links(&base, extract_hrefs(&doc)),
        Err(e) => {
            ::log::warn!("Cannot resolve links against {}: {}", source_url, e);
            Vec::new()
        }
    };

    ::log::debug!(
        "HTML parser found {} related links in {}",
        related_links.len(),
        source_url
    );

    ParsedArticle {
        title,
        body_text,
        related_links,
    }
}

/// Text of the first `h1` or `h2` in document order
pub fn extract_title(doc: &Html) -> String {
    doc.select(&HEADING)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Paragraph text of the article inside `main`, joined by newlines
///
/// Falls back to every paragraph of `main` when there is no `article`, and to
/// the whole document when there is no `main`.
pub fn extract_body(doc: &Html) -> String {
    let region = doc
        .select(&MAIN)
        .next()
        .unwrap_or_else(|| doc.root_element());
    let container = region.select(&ARTICLE).next().unwrap_or(region);

    container
        .select(&PARAGRAPH)
        .map(element_text)
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every anchor `href` on the page, unresolved
pub fn extract_hrefs(doc: &Html) -> Vec<&str> {
    doc.select(&ANCHOR)
        .filter_map(|e| e.value().attr("href"))
        .collect()
}

/// Trimmed text nodes of an element joined by single spaces
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
