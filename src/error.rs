//! Error taxonomy for extraction operations.
//!
//! Every failure is recovered at the extractor boundary and surfaced as a
//! human-readable string; nothing propagates as a raised fault out of the
//! crate. Soft conditions are valid "nothing found" outcomes that callers
//! may render differently from hard failures.

use thiserror::Error;

/// Failure and no-match conditions produced by the extractors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The rendered fetch produced no document.
    #[error("Failed to fetch page with JS rendering.")]
    RenderFetch,

    /// Soft: the selection criteria matched no elements.
    #[error("No matching elements found.")]
    NoMatches,

    /// Soft: the page contains no tables.
    #[error("No tables found on this page.")]
    NoTables,

    /// Soft: the raw-fetch fallback found no paragraph text.
    #[error("No readable paragraph text found.")]
    NoReadableText,

    /// Malformed structure broke table parsing.
    #[error("{0}")]
    TableStructure(String),

    /// The site's robots policy denies this URL.
    #[error("This page is disallowed for scraping by the site's robots.txt rules.")]
    Disallowed,
}

impl ExtractError {
    /// Whether this is a soft "nothing found" outcome rather than a hard
    /// failure.
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        matches!(self, Self::NoMatches | Self::NoTables | Self::NoReadableText)
    }
}
