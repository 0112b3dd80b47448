use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fetched and parsed bulletin page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL of the page
    pub url: String,

    /// First `h1`/`h2` heading, empty if the page has none
    pub title: String,

    /// Cleaned article text
    pub body_text: String,

    /// Date recovered from the title
    pub date: Option<NaiveDate>,
}

impl PageRecord {
    /// Create a new page record
    pub fn new(url: String, title: String, body_text: String, date: Option<NaiveDate>) -> Self {
        Self {
            url,
            title,
            body_text,
            date,
        }
    }

    /// ISO-8601 date, or an empty string for undated records
    pub fn date_slug(&self) -> String {
        self.date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
