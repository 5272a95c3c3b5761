//! # HTML Report Parsing Module / HTML 报告解析模块
//!
//! Reads the per-library report produced by OpenModelicaLibraryTesting.
//! The report contains two tables in document order:
//!
//! 1. the overview table, one header row plus one row of aggregate counts
//!    (`Total`, ..., `Simulation`, `Verification`);
//! 2. the results table, one row per tested model, passed through as-is.
//!
//! 读取 OpenModelicaLibraryTesting 生成的单库报告。报告按文档顺序包含概览表和结果表。

use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;

use crate::core::models::OverviewStats;

/// Header names of the overview columns that carry the verdict.
pub const TOTAL_COLUMN: &str = "Total";
pub const SIMULATION_COLUMN: &str = "Simulation";
pub const VERIFICATION_COLUMN: &str = "Verification";

/// Errors raised when a report does not match the expected layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Fewer than two tables in the document
    #[error("expected an overview and a results table, found {found} table(s)")]
    MissingTables { found: usize },

    /// The overview table has no data row
    #[error("the overview table has no data row")]
    EmptyOverview,

    /// A required overview column is absent
    #[error("the overview table has no '{0}' column")]
    MissingColumn(String),

    /// A count cell is not a non-negative integer
    #[error("column '{column}' holds '{value}', expected a number")]
    InvalidCount { column: String, value: String },

    /// Internal selector failure
    #[error("invalid selector '{0}'")]
    Selector(String),
}

/// A piece of cell content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Link { text: String, href: String },
}

/// One table cell, kept as text and links so links can be rewritten later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub fragments: Vec<Fragment>,
}

impl Cell {
    /// Cell content with links reduced to their text and whitespace collapsed.
    pub fn text(&self) -> String {
        let raw: String = self
            .fragments
            .iter()
            .map(|fragment| match fragment {
                Fragment::Text(text) => text.as_str(),
                Fragment::Link { text, .. } => text.as_str(),
            })
            .collect();
        collapse_whitespace(&raw)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Fragment::Text(last)) = self.fragments.last_mut() {
            last.push_str(text);
        } else {
            self.fragments.push(Fragment::Text(text.to_string()));
        }
    }
}

/// A table as a header row plus body rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    pub header: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
}

impl HtmlTable {
    /// Index of the header cell whose text equals `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|cell| cell.text() == name)
    }
}

/// Both tables of a library report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryReport {
    pub overview: HtmlTable,
    pub results: HtmlTable,
}

impl LibraryReport {
    /// Parses a report document. Tables after the second are ignored.
    pub fn parse(html: &str) -> Result<Self, ReportError> {
        let document = Html::parse_document(html);
        let tables = selector("table")?;

        let mut found: Vec<HtmlTable> = Vec::with_capacity(2);
        for table in document.select(&tables).take(2) {
            found.push(parse_table(table)?);
        }

        let mut found = found.into_iter();
        match (found.next(), found.next()) {
            (Some(overview), Some(results)) => Ok(Self { overview, results }),
            (overview, _) => Err(ReportError::MissingTables {
                found: usize::from(overview.is_some()),
            }),
        }
    }

    /// Reads `Total`, `Simulation` and `Verification` from the first overview row.
    pub fn overview_stats(&self) -> Result<OverviewStats, ReportError> {
        let row = self.overview.rows.first().ok_or(ReportError::EmptyOverview)?;
        let count = |name: &str| -> Result<u32, ReportError> {
            let index = self
                .overview
                .column(name)
                .ok_or_else(|| ReportError::MissingColumn(name.to_string()))?;
            let value = row.get(index).map(Cell::text).unwrap_or_default();
            value.parse().map_err(|_| ReportError::InvalidCount {
                column: name.to_string(),
                value,
            })
        };

        Ok(OverviewStats {
            total: count(TOTAL_COLUMN)?,
            simulated: count(SIMULATION_COLUMN)?,
            verified: count(VERIFICATION_COLUMN)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ReportError> {
    Selector::parse(css).map_err(|_| ReportError::Selector(css.to_string()))
}

fn parse_table(table: ElementRef<'_>) -> Result<HtmlTable, ReportError> {
    let rows_selector = selector("tr")?;
    let mut rows = table.select(&rows_selector).map(|row| {
        row.children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "th" | "td"))
            .map(parse_cell)
            .collect::<Vec<_>>()
    });

    let header = rows.next().unwrap_or_default();
    Ok(HtmlTable {
        header,
        rows: rows.filter(|row| !row.is_empty()).collect(),
    })
}

fn parse_cell(element: ElementRef<'_>) -> Cell {
    let mut cell = Cell::default();
    collect_fragments(element, &mut cell);
    cell
}

fn collect_fragments(element: ElementRef<'_>, cell: &mut Cell) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => cell.push_text(text),
            Node::Element(el) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                match (el.name(), el.attr("href")) {
                    ("a", Some(href)) => cell.fragments.push(Fragment::Link {
                        text: collapse_whitespace(&child_element.text().collect::<String>()),
                        href: href.trim().to_string(),
                    }),
                    ("br", _) => cell.push_text(" "),
                    _ => collect_fragments(child_element, cell),
                }
            }
            _ => {}
        }
    }
}

/// Collapses runs of whitespace to one space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
