use regex::Regex;
use std::sync::LazyLock;

/// "Read also" block that trails the bulletin text
static READ_ALSO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)читайте також").expect("read-also pattern"));

static HORIZONTAL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("horizontal whitespace pattern"));

static SPACE_BEFORE_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("space before newline pattern"));

/// Cuts the text at the first "Читайте також" marker, in any letter case
pub fn truncate_at_read_also(text: &str) -> &str {
    match READ_ALSO.find(text) {
        Some(marker) => &text[..marker.start()],
        None => text,
    }
}

/// Collapses spaces and tabs, strips them before newlines and trims the ends
///
/// Newlines themselves are left alone, so paragraph breaks survive.
pub fn normalize_whitespace(text: &str) -> String {
    let collapsed = HORIZONTAL_RUN.replace_all(text, " ");
    let stripped = SPACE_BEFORE_NEWLINE.replace_all(&collapsed, "\n");
    stripped.trim().to_string()
}

/// Truncation followed by whitespace normalization
pub fn clean_body(text: &str) -> String {
    normalize_whitespace(truncate_at_read_also(text))
}
