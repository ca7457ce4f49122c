//! Full-page extraction: every table plus every heading/paragraph text
//! node on the rendered page.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::stripped_text;
use super::tables::{Table, parse_tables};
use crate::error::ExtractError;
use crate::fetcher::fetch_rendered;

static TEXT_BLOCK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, p")
        .expect("BUG: hardcoded selector 'h1, h2, h3, p' is statically valid")
});

/// Trimmed visible text of every level 1-3 heading and paragraph, in
/// document order, empty ones dropped.
pub fn page_text_fragments(doc: &Html) -> Vec<String> {
    doc.select(&TEXT_BLOCK_SELECTOR)
        .map(stripped_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Tables and text fragments from already-rendered HTML.
///
/// Zero tables is a soft condition: the text fragments are still returned
/// next to the informational message. A structural parsing failure is hard
/// and empties both result slots.
pub fn extract_page_content(html: &str) -> (Vec<Table>, Vec<String>, Option<String>) {
    let doc = Html::parse_document(html);
    let text = page_text_fragments(&doc);

    match parse_tables(&doc) {
        Ok(tables) if tables.is_empty() => (tables, text, Some(ExtractError::NoTables.to_string())),
        Ok(tables) => (tables, text, None),
        Err(e) => (Vec::new(), Vec::new(), Some(format!("Error during extraction: {e}"))),
    }
}

/// Fetch `url` rendered and extract all tables and heading/paragraph text.
pub async fn extract_data(url: &str) -> (Vec<Table>, Vec<String>, Option<String>) {
    let Some(html) = fetch_rendered(url).await else {
        return (
            Vec::new(),
            Vec::new(),
            Some(ExtractError::RenderFetch.to_string()),
        );
    };
    extract_page_content(&html)
}
