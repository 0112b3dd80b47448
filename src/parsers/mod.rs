pub mod date;
pub mod html;
pub mod text;


use crate::filter::LinkFilter;

/// Fields pulled out of a bulletin page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArticle {
    /// First `h1`/`h2` heading text
    pub title: String,
    /// Cleaned article body
    pub body_text: String,
    /// Absolute links to other bulletins, first-seen order
    pub related_links: Vec<String>,
}

/// Parses rendered markup fetched from `source_url`
pub fn parse_article(markup: &str, source_url: &str, filter: &LinkFilter) -> ParsedArticle {
    html::parse(markup, source_url, filter)
}
