//! Clean-text extraction: a readability-style article body with a
//! raw-fetch paragraph fallback.
//!
//! Error states are encoded in the returned string — failures begin with
//! `Error:` and a page with nothing readable yields an explicit sentinel —
//! so the result is always directly displayable.

use std::sync::LazyLock;
use std::time::Duration;

use dom_smoothie::Readability;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use super::stripped_text;
use super::text_cleanup::clean_article_text;
use crate::error::ExtractError;
use crate::fetcher::fetch_rendered;
use crate::utils::constants::{CHROME_USER_AGENT, MIN_ARTICLE_CHARS, RAW_FETCH_TIMEOUT_SECS};

static P_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("p").expect("BUG: hardcoded selector 'p' is statically valid")
});

/// Tables are excluded from article bodies; stripping them before the
/// readability pass keeps tabular noise out of the candidate scoring.
static TABLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<table[^>]*>.*?</table>")
        .expect("BUG: hardcoded table regex is statically valid")
});

/// Extract the main article body of `url` as cleaned plain text.
///
/// Primary path: rendered fetch plus readability extraction, accepted only
/// above a minimum length. Fallback: raw fetch, all paragraph text joined
/// by blank lines. Both paths share the same post-processing.
pub async fn extract_clean_text(url: &str) -> String {
    if let Some(html) = fetch_rendered(url).await
        && let Some(text) = readability_text(&html, url)
        && text.trim().chars().count() > MIN_ARTICLE_CHARS
    {
        return clean_article_text(&text);
    }

    fallback_clean_text(url).await
}

/// Readability pass over rendered HTML, with tables stripped up front.
/// Returns `None` when the document yields no article text.
pub fn readability_text(html: &str, url: &str) -> Option<String> {
    let without_tables = TABLE_BLOCK.replace_all(html, "").into_owned();

    let mut readability = match Readability::new(without_tables.as_str(), Some(url), None) {
        Ok(readability) => readability,
        Err(e) => {
            debug!("Readability rejected document for {url}: {e}");
            return None;
        }
    };

    match readability.parse() {
        Ok(article) => {
            let text = article.text_content.trim().to_string();
            (!text.is_empty()).then_some(text)
        }
        Err(e) => {
            debug!("Readability parse failed for {url}: {e}");
            None
        }
    }
}

/// Raw-fetch fallback: every paragraph's trimmed text, blank-line
/// separated, post-processed like the primary path.
pub async fn fallback_clean_text(url: &str) -> String {
    let client = match reqwest::Client::builder()
        .user_agent(CHROME_USER_AGENT)
        .timeout(Duration::from_secs(RAW_FETCH_TIMEOUT_SECS))
        .danger_accept_invalid_certs(true)
        .build()
    {
        Ok(client) => client,
        Err(e) => return format!("Error: {e}"),
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return format!("Error: {e}"),
    };

    if !response.status().is_success() {
        return format!(
            "Error: Failed to fetch page (status code: {})",
            response.status().as_u16()
        );
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return format!("Error: {e}"),
    };

    let text = paragraph_text(&body);
    if text.is_empty() {
        return ExtractError::NoReadableText.to_string();
    }
    clean_article_text(&text)
}

/// All paragraph text of an HTML document, one blank line between
/// paragraphs, empty paragraphs dropped.
pub fn paragraph_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.select(&P_SELECTOR)
        .map(stripped_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
