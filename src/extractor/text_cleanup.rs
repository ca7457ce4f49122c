//! Superficial pattern stripping shared by the extractors and their
//! callers: reference markers, edit markers, and a known boilerplate
//! notice. No classification, no NLP.

use std::sync::LazyLock;

use regex::Regex;

static FOOTNOTE_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d+\]").expect("BUG: hardcoded footnote regex is statically valid")
});

static EDIT_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[edit\]").expect("BUG: hardcoded edit-marker regex is statically valid")
});

/// The maintenance banner wiki mirrors render above article bodies.
/// Matched case-insensitively and across newlines; the rendered notice
/// wraps over several lines.
static MULTIPLE_ISSUES_NOTICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)This article has multiple issues.*?talk page\.")
        .expect("BUG: hardcoded notice regex is statically valid")
});

/// Strip `[N]` footnote markers, literal `[edit]` markers, and the
/// multiple-issues boilerplate notice, then trim surrounding whitespace.
#[must_use]
pub fn clean_article_text(text: &str) -> String {
    let text = FOOTNOTE_MARKERS.replace_all(text, "");
    let text = EDIT_MARKERS.replace_all(&text, "");
    let text = MULTIPLE_ISSUES_NOTICE.replace_all(&text, "");
    text.trim().to_string()
}
