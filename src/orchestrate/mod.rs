//! Mode dispatch at the orchestrator boundary.
//!
//! Runs the robots policy gate, then exactly one of the three extraction
//! strategies, and returns one of the four result shapes next to an
//! optional human-readable error. Structured shapes are serializable for
//! the export collaborator; [`ExtractionResult::flattened_text`] is the
//! untouched handoff for the language-model collaborator.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExtractError;
use crate::extractor::clean_text::extract_clean_text;
use crate::extractor::criteria::TagCriteria;
use crate::extractor::full_page::extract_data;
use crate::extractor::tables::Table;
use crate::extractor::tag_filter::{TagRecord, collect_tag_lines, collect_tag_records};
use crate::policy;

/// Which extraction strategy to run. Exactly one runs per request; modes
/// are never mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExtractionMode {
    /// All tables plus all heading/paragraph text.
    Full,
    /// Readability-style article body.
    Clean,
    /// Caller-supplied criteria, line-oriented output.
    Tags(TagCriteria),
    /// Caller-supplied criteria, record-oriented output.
    TagsStructured(TagCriteria),
}

/// One of the four result shapes, tagged for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ExtractionResult {
    Full {
        tables: Vec<Table>,
        text: Vec<String>,
    },
    Clean {
        text: String,
    },
    Tags {
        lines: Vec<String>,
    },
    TagsStructured {
        records: Vec<TagRecord>,
    },
}

impl ExtractionResult {
    /// Raw text handed untouched to the language-model collaborator. No
    /// truncation and no token accounting happen here.
    #[must_use]
    pub fn flattened_text(&self) -> String {
        match self {
            Self::Full { tables, text } => {
                let mut parts: Vec<String> = text.clone();
                for table in tables {
                    if !table.headers.is_empty() {
                        parts.push(table.headers.join("\t"));
                    }
                    for row in &table.rows {
                        parts.push(row.join("\t"));
                    }
                }
                parts.join("\n")
            }
            Self::Clean { text } => text.clone(),
            Self::Tags { lines } => lines.join("\n"),
            Self::TagsStructured { records } => records
                .iter()
                .map(|r| format!("{}\t{}\t{}\t{}", r.tag, r.text, r.src_or_href, r.alt))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// True when the shape carries no extracted content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Full { tables, text } => tables.is_empty() && text.is_empty(),
            Self::Clean { text } => text.trim().is_empty(),
            Self::Tags { lines } => lines.is_empty(),
            Self::TagsStructured { records } => records.is_empty(),
        }
    }
}

/// A result shape plus an optional display error. Soft no-match outcomes
/// carry their informational message here, next to whatever content was
/// still extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub result: ExtractionResult,
    pub error: Option<String>,
}

/// Run one extraction: the policy gate first, then exactly one extractor.
///
/// A robots denial returns immediately with an empty result for the
/// requested mode; everything else degrades into the response's error
/// slot, never into a raised fault.
pub async fn run_extraction(url: &str, mode: ExtractionMode) -> ExtractionResponse {
    if !policy::is_allowed(url, "*").await {
        info!("Robots policy denied {url}");
        return ExtractionResponse {
            result: empty_result_for(&mode),
            error: Some(ExtractError::Disallowed.to_string()),
        };
    }

    match mode {
        ExtractionMode::Full => {
            let (tables, text, error) = extract_data(url).await;
            ExtractionResponse {
                result: ExtractionResult::Full { tables, text },
                error,
            }
        }
        ExtractionMode::Clean => {
            let text = extract_clean_text(url).await;
            if text.starts_with("Error:") || text.trim().is_empty() {
                ExtractionResponse {
                    result: ExtractionResult::Clean {
                        text: String::new(),
                    },
                    error: Some(text),
                }
            } else {
                ExtractionResponse {
                    result: ExtractionResult::Clean { text },
                    error: None,
                }
            }
        }
        ExtractionMode::Tags(criteria) => match collect_tag_lines(url, &criteria).await {
            Ok(lines) if lines.is_empty() => ExtractionResponse {
                result: ExtractionResult::Tags { lines },
                error: Some(ExtractError::NoMatches.to_string()),
            },
            Ok(lines) => ExtractionResponse {
                result: ExtractionResult::Tags { lines },
                error: None,
            },
            Err(e) => ExtractionResponse {
                result: ExtractionResult::Tags { lines: Vec::new() },
                error: Some(format!("Error: {e}")),
            },
        },
        ExtractionMode::TagsStructured(criteria) => {
            match collect_tag_records(url, &criteria).await {
                Ok(records) if records.is_empty() => ExtractionResponse {
                    result: ExtractionResult::TagsStructured { records },
                    error: Some(ExtractError::NoMatches.to_string()),
                },
                Ok(records) => ExtractionResponse {
                    result: ExtractionResult::TagsStructured { records },
                    error: None,
                },
                Err(e) => ExtractionResponse {
                    result: ExtractionResult::TagsStructured {
                        records: Vec::new(),
                    },
                    error: Some(format!("Error: {e}")),
                },
            }
        }
    }
}

fn empty_result_for(mode: &ExtractionMode) -> ExtractionResult {
    match mode {
        ExtractionMode::Full => ExtractionResult::Full {
            tables: Vec::new(),
            text: Vec::new(),
        },
        ExtractionMode::Clean => ExtractionResult::Clean {
            text: String::new(),
        },
        ExtractionMode::Tags(_) => ExtractionResult::Tags { lines: Vec::new() },
        ExtractionMode::TagsStructured(_) => ExtractionResult::TagsStructured {
            records: Vec::new(),
        },
    }
}
