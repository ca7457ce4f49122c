//! Tag-filtered extraction: caller-selected elements as formatted lines or
//! structured records.
//!
//! The line-oriented and structured variants intentionally differ in their
//! identity-key and emptiness rules. Callers depend on both behaviors
//! distinctly (lines for human display, records for tabular export), so
//! the two are specified and kept independent — only the class/id/
//! visibility filter stage is shared.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::criteria::{SearchDepth, TagCriteria};
use super::{element_children, stripped_text};
use crate::error::ExtractError;
use crate::fetcher::fetch_rendered;

/// One accepted element in structured form, ready for tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub tag: String,
    pub text: String,
    pub src_or_href: String,
    pub alt: String,
}

/// Role-specific identity and formatting for the line-oriented variant.
///
/// `img` and `a` carry their identity in attributes; every other tag is
/// identified by its visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagRole {
    Image,
    Anchor,
    Generic,
}

impl TagRole {
    fn of(tag: &str) -> Self {
        match tag {
            "img" => Self::Image,
            "a" => Self::Anchor,
            _ => Self::Generic,
        }
    }

    /// Identity key and display line for an element, or `None` when the
    /// element fails this role's acceptance rules.
    fn render(
        self,
        tag: &str,
        element: ElementRef<'_>,
        skip_empty: bool,
    ) -> Option<(String, String)> {
        match self {
            Self::Image => {
                let src = element.value().attr("src").unwrap_or("");
                if src.is_empty() {
                    return None;
                }
                let alt = element.value().attr("alt").unwrap_or("");
                Some((
                    format!("{src}|{alt}"),
                    format!("<img>: src={src}, alt={alt}"),
                ))
            }
            Self::Anchor => {
                let text = stripped_text(element);
                if skip_empty && text.is_empty() {
                    return None;
                }
                let href = element.value().attr("href").unwrap_or("");
                Some((
                    format!("{href}|{text}"),
                    format!("<a>: text='{text}', href={href}"),
                ))
            }
            Self::Generic => {
                let text = stripped_text(element);
                if skip_empty && text.is_empty() {
                    return None;
                }
                let line = format!("<{tag}>: {text}");
                Some((text, line))
            }
        }
    }
}

/// Elements matching one tag name, honoring the requested depth.
///
/// Deep searches the whole tree in document order; shallow considers only
/// direct element children of the document root.
fn candidates<'a>(doc: &'a Html, tag: &str, depth: SearchDepth) -> Vec<ElementRef<'a>> {
    match depth {
        SearchDepth::Deep => match Selector::parse(tag) {
            Ok(selector) => doc.select(&selector).collect(),
            Err(e) => {
                debug!("Skipping unselectable tag name {tag:?}: {e}");
                Vec::new()
            }
        },
        SearchDepth::Shallow => element_children(doc.tree.root())
            .filter(|el| el.value().name() == tag)
            .collect(),
    }
}

/// Class, id, and visibility filters shared by both variants.
fn passes_filters(element: ElementRef<'_>, criteria: &TagCriteria) -> bool {
    if !criteria.class_filter.is_empty()
        && !element
            .value()
            .classes()
            .any(|class| class == criteria.class_filter)
    {
        return false;
    }

    if !criteria.id_filter.is_empty() && element.value().id() != Some(criteria.id_filter.as_str())
    {
        return false;
    }

    if criteria.skip_hidden {
        let style = element.value().attr("style").unwrap_or("");
        let collapsed: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if collapsed.contains("display:none") {
            return false;
        }
    }

    true
}

/// Line-oriented extraction over already-rendered HTML.
///
/// One dedup set spans the whole call, shared across all tags; it is
/// constructed here and discarded with the call.
pub fn extract_lines_from_html(html: &str, criteria: &TagCriteria) -> Vec<String> {
    let doc = Html::parse_document(html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut lines = Vec::new();

    for tag in &criteria.tags {
        let tag = tag.to_ascii_lowercase();
        let role = TagRole::of(&tag);

        for element in candidates(&doc, &tag, criteria.depth) {
            if !passes_filters(element, criteria) {
                continue;
            }
            let Some((key, line)) = role.render(&tag, element, criteria.skip_empty) else {
                continue;
            };
            if criteria.skip_duplicates && !seen.insert(key) {
                continue;
            }
            lines.push(line);
        }
    }

    lines
}

/// Structured extraction over already-rendered HTML.
///
/// Uses the unified `tag|text|src_or_href` identity key and the unified
/// emptiness rule (reject only when both text and src/href are empty) —
/// deliberately different from the line-oriented rules above.
pub fn extract_records_from_html(html: &str, criteria: &TagCriteria) -> Vec<TagRecord> {
    let doc = Html::parse_document(html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut rows = Vec::new();

    for tag in &criteria.tags {
        let tag = tag.to_ascii_lowercase();

        for element in candidates(&doc, &tag, criteria.depth) {
            if !passes_filters(element, criteria) {
                continue;
            }

            let text = stripped_text(element);
            let src_or_href = element
                .value()
                .attr("src")
                .filter(|src| !src.is_empty())
                .or_else(|| element.value().attr("href"))
                .unwrap_or("")
                .to_string();
            let alt = element.value().attr("alt").unwrap_or("").to_string();

            if criteria.skip_empty && text.is_empty() && src_or_href.is_empty() {
                continue;
            }

            let key = format!("{tag}|{text}|{src_or_href}");
            if criteria.skip_duplicates && !seen.insert(key) {
                continue;
            }

            rows.push(TagRecord {
                tag: tag.clone(),
                text,
                src_or_href,
                alt,
            });
        }
    }

    rows
}

/// Line-oriented extraction with a typed error, for callers that need to
/// distinguish the soft no-match outcome from a failed fetch.
pub async fn collect_tag_lines(
    url: &str,
    criteria: &TagCriteria,
) -> Result<Vec<String>, ExtractError> {
    let html = fetch_rendered(url).await.ok_or(ExtractError::RenderFetch)?;
    Ok(extract_lines_from_html(&html, criteria))
}

/// Structured extraction with a typed error, used by the mode dispatcher.
pub async fn collect_tag_records(
    url: &str,
    criteria: &TagCriteria,
) -> Result<Vec<TagRecord>, ExtractError> {
    let html = fetch_rendered(url).await.ok_or(ExtractError::RenderFetch)?;
    Ok(extract_records_from_html(&html, criteria))
}

/// Fetch `url` rendered and extract formatted lines per `criteria`.
///
/// Failures come back as display text, never as an error: a failed fetch
/// yields `Error: Failed to fetch page with JS rendering.` and criteria
/// matching nothing yield `No matching elements found.`.
pub async fn extract_by_tags(url: &str, criteria: &TagCriteria) -> String {
    match collect_tag_lines(url, criteria).await {
        Ok(lines) if lines.is_empty() => ExtractError::NoMatches.to_string(),
        Ok(lines) => lines.join("\n"),
        Err(e) => format!("Error: {e}"),
    }
}

/// Structured sibling of [`extract_by_tags`]: record rows plus an optional
/// human-readable error string.
pub async fn extract_by_tags_structured(
    url: &str,
    criteria: &TagCriteria,
) -> (Vec<TagRecord>, Option<String>) {
    match collect_tag_records(url, criteria).await {
        Ok(rows) if rows.is_empty() => (rows, Some(ExtractError::NoMatches.to_string())),
        Ok(rows) => (rows, None),
        Err(e) => (Vec::new(), Some(format!("Error: {e}"))),
    }
}
