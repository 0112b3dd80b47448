use crate::error::CrawlError;
use crate::results::PageRecord;
use crate::utils::export_filename;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One CSV row; field names are the column headers
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    url: &'a str,
    title: &'a str,
    text: &'a str,
    date_slug: String,
}

impl<'a> From<&'a PageRecord> for ExportRow<'a> {
    fn from(record: &'a PageRecord) -> Self {
        Self {
            url: &record.url,
            title: &record.title,
            text: &record.body_text,
            date_slug: record.date_slug(),
        }
    }
}

/// Reduces crawl output to the final export set
///
/// Drops repeated URLs (first wins). When any record is dated, keeps only
/// dated records, newest first, with ties left in visit order; otherwise
/// keeps visit order. Either way at most `target_count` records remain.
pub fn aggregate(records: &[PageRecord], target_count: usize) -> Vec<PageRecord> {
    let mut seen = HashSet::new();
    let unique: Vec<PageRecord> = records
        .iter()
        .filter(|record| seen.insert(record.url.as_str()))
        .cloned()
        .collect();

    let (mut dated, mut undated): (Vec<_>, Vec<_>) =
        unique.into_iter().partition(|record| record.date.is_some());

    if dated.is_empty() {
        undated.truncate(target_count);
        return undated;
    }

    dated.sort_by(|a, b| b.date.cmp(&a.date));
    dated.truncate(target_count);
    dated
}

/// Writes records as CSV with a `url,title,text,date_slug` header
pub fn write_csv<W: Write>(writer: W, records: &[PageRecord]) -> Result<(), CrawlError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        csv_writer.write_record(["url", "title", "text", "date_slug"])?;
    }
    for record in records {
        csv_writer.serialize(ExportRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the export file into `dir` and returns its path
pub fn export_to_dir(
    dir: &Path,
    records: &[PageRecord],
    target_count: usize,
) -> Result<PathBuf, CrawlError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(target_count));
    let file = std::fs::File::create(&path)?;
    write_csv(file, records)?;
    ::log::info!("Saved {} rows to {}", records.len(), path.display());
    Ok(path)
}
