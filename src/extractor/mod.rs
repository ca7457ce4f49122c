//! Content extraction strategies over rendered documents.
//!
//! Three mutually-exclusive extractors share the rendering fetcher and the
//! text normalization helpers here: tag-filtered extraction
//! ([`tag_filter`]), full-page table/text extraction ([`full_page`]), and
//! readability-style clean-text extraction ([`clean_text`]). Each public
//! entry point re-fetches its URL independently; nothing is cached between
//! calls.

pub mod clean_text;
pub mod criteria;
pub mod full_page;
pub mod tables;
pub mod tag_filter;
pub mod text_cleanup;

pub use clean_text::extract_clean_text;
pub use criteria::{SearchDepth, TagCriteria};
pub use full_page::extract_data;
pub use tables::Table;
pub use tag_filter::{TagRecord, extract_by_tags, extract_by_tags_structured};
pub use text_cleanup::clean_article_text;

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

/// Visible text of an element: every descendant text node trimmed and
/// concatenated. This is the whitespace-stripping join all extractors use.
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Element children of a DOM node, in document order.
pub(crate) fn element_children(
    node: NodeRef<'_, Node>,
) -> impl Iterator<Item = ElementRef<'_>> {
    node.children().filter_map(ElementRef::wrap)
}
