//! Caller-supplied element-selection criteria for tag-filtered extraction.

use serde::{Deserialize, Serialize};

/// Whether element selection recurses into descendants (`Deep`) or
/// considers only direct children of the document root (`Shallow`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Deep,
    Shallow,
}

/// Selection criteria for one tag-filtered extraction call.
///
/// Tag order controls scan order; selection itself has set semantics. The
/// filters are exact matches: `class_filter` against membership in an
/// element's class list, `id_filter` against its `id` attribute. Empty
/// filter strings are disabled filters. Immutable for the duration of one
/// extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCriteria {
    pub tags: Vec<String>,
    pub class_filter: String,
    pub id_filter: String,
    pub skip_empty: bool,
    pub skip_duplicates: bool,
    pub skip_hidden: bool,
    pub depth: SearchDepth,
}

impl TagCriteria {
    /// Criteria for the given tags with every option at its default.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl Default for TagCriteria {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            class_filter: String::new(),
            id_filter: String::new(),
            skip_empty: true,
            skip_duplicates: true,
            skip_hidden: true,
            depth: SearchDepth::Deep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_all_skips_and_deep_scan() {
        let criteria = TagCriteria::new(["a", "img"]);
        assert_eq!(criteria.tags, vec!["a", "img"]);
        assert!(criteria.skip_empty);
        assert!(criteria.skip_duplicates);
        assert!(criteria.skip_hidden);
        assert_eq!(criteria.depth, SearchDepth::Deep);
        assert!(criteria.class_filter.is_empty());
        assert!(criteria.id_filter.is_empty());
    }
}
