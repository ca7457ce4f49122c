//! HTML tables into row/column structure.
//!
//! Parses every `<table>` in a document into header/body rows padded to a
//! uniform width, following the usual table-to-tabular-data conventions:
//! a `<thead>` row (or a leading all-`<th>` row) becomes the header,
//! colspans are expanded by repeating cell content, and rows of nested
//! tables belong to the nearest enclosing table only.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use super::{element_children, stripped_text};
use crate::error::ExtractError;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("BUG: hardcoded selector 'table' is statically valid")
});

static TR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr").expect("BUG: hardcoded selector 'tr' is statically valid")
});

/// Maximum colspan honored per cell; larger declared spans are clamped.
const MAX_COLSPAN: usize = 100;

/// Maximum total cells per table before parsing is abandoned as a
/// structural failure. Prevents memory exhaustion from pathological
/// colspan combinations.
const MAX_TOTAL_CELLS: usize = 100_000;

/// One parsed table: header row (empty when none was detected) plus body
/// rows, all padded to a uniform width.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Column count after padding.
    #[must_use]
    pub fn width(&self) -> usize {
        self.headers
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0))
    }
}

/// Parse every table in the document, skipping ones with no rows at all.
pub fn parse_tables(doc: &Html) -> Result<Vec<Table>, ExtractError> {
    let mut tables = Vec::new();
    for element in doc.select(&TABLE_SELECTOR) {
        let table = parse_table(element)?;
        if table.headers.is_empty() && table.rows.is_empty() {
            continue;
        }
        tables.push(table);
    }
    Ok(tables)
}

struct RawRow {
    in_thead: bool,
    all_th: bool,
    cells: Vec<String>,
}

fn parse_table(table: ElementRef<'_>) -> Result<Table, ExtractError> {
    let mut raw_rows: Vec<RawRow> = Vec::new();
    let mut total_cells = 0usize;

    for tr in table.select(&TR_SELECTOR) {
        // `select` recurses into nested tables; keep only rows whose
        // nearest enclosing table is this one.
        if nearest_table(tr).map(|t| t.id()) != Some(table.id()) {
            continue;
        }

        let mut cells = Vec::new();
        let mut all_th = true;
        for cell in element_children(*tr) {
            let name = cell.value().name();
            if name != "td" && name != "th" {
                continue;
            }
            if name != "th" {
                all_th = false;
            }

            let span = cell
                .value()
                .attr("colspan")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(1)
                .clamp(1, MAX_COLSPAN);

            total_cells += span;
            if total_cells > MAX_TOTAL_CELLS {
                return Err(ExtractError::TableStructure(format!(
                    "table exceeds {MAX_TOTAL_CELLS} cells"
                )));
            }

            let text = stripped_text(cell);
            for _ in 0..span {
                cells.push(text.clone());
            }
        }

        if !cells.is_empty() {
            raw_rows.push(RawRow {
                in_thead: is_in_thead(tr),
                all_th,
                cells,
            });
        }
    }

    // Header-row detection: the leading row wins the header slot when it
    // sits in a thead or consists entirely of th cells.
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (index, raw) in raw_rows.into_iter().enumerate() {
        if index == 0 && (raw.in_thead || raw.all_th) {
            headers = raw.cells;
        } else {
            rows.push(raw.cells);
        }
    }

    let width = headers
        .len()
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    if !headers.is_empty() {
        headers.resize(width, String::new());
    }
    for row in &mut rows {
        row.resize(width, String::new());
    }

    Ok(Table { headers, rows })
}

/// Nearest `<table>` ancestor of an element.
fn nearest_table(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "table")
}

/// Whether a row sits inside this table's `<thead>` section.
fn is_in_thead(tr: ElementRef<'_>) -> bool {
    for ancestor in tr.ancestors().filter_map(ElementRef::wrap) {
        match ancestor.value().name() {
            "thead" => return true,
            "table" => return false,
            _ => {}
        }
    }
    false
}
