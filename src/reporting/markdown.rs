//! # Markdown Rendering Module / Markdown 渲染模块
//!
//! Renders report tables as GitHub-flavored markdown for the job summary.
//!
//! 将报告表格渲染为 GitHub 风格的 markdown，用于作业摘要。

use crate::reporting::html::{Cell, Fragment, HtmlTable, collapse_whitespace};

/// How links inside table cells are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkMode {
    /// Links are replaced by their text. Relative links cannot resolve in a job summary.
    Strip,
    /// Relative links are resolved against this base URL (no trailing `/`).
    Absolute(String),
}

impl LinkMode {
    /// Links relative to the directory of the published report page.
    pub fn for_report_url(report_url: Option<&str>) -> Self {
        match report_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => LinkMode::Absolute(base_url(url)),
            None => LinkMode::Strip,
        }
    }

    fn render_link(&self, text: &str, href: &str) -> String {
        match self {
            LinkMode::Strip => escape_markdown(text),
            LinkMode::Absolute(base) => format!(
                "[{}]({})",
                escape_markdown(text),
                encode_href(&resolve_href(base, href))
            ),
        }
    }
}

/// Directory part of a page URL: `https://h/a/b/page.html` -> `https://h/a/b`.
/// A URL ending in `/` is already a directory, even if its last segment has a dot.
pub fn base_url(page_url: &str) -> String {
    let trimmed = page_url.trim_end_matches('/');
    if trimmed.len() != page_url.len() {
        return trimmed.to_string();
    }
    let after_scheme = trimmed.find("://").map_or(0, |i| i + 3);
    let is_page = trimmed
        .rsplit('/')
        .next()
        .is_some_and(|last| last.contains('.'));

    match trimmed.rfind('/') {
        Some(slash) if slash >= after_scheme && is_page => trimmed[..slash].to_string(),
        _ => trimmed.to_string(),
    }
}

fn resolve_href(base: &str, href: &str) -> String {
    let is_absolute = href.contains("://")
        || href.starts_with('#')
        || href.starts_with('/')
        || href.starts_with("mailto:");
    if is_absolute {
        href.to_string()
    } else {
        format!("{base}/{}", href.trim_start_matches("./"))
    }
}

fn encode_href(href: &str) -> String {
    href.replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
}

/// Escapes characters with markdown meaning inside table cells.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn render_cell(cell: &Cell, links: &LinkMode) -> String {
    let rendered: String = cell
        .fragments
        .iter()
        .map(|fragment| match fragment {
            Fragment::Text(text) => escape_markdown(text),
            Fragment::Link { text, href } => links.render_link(text, href),
        })
        .collect();
    collapse_whitespace(&rendered)
}

fn render_row(cells: &[String]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(cell);
        line.push_str(" |");
    }
    line
}

/// Renders a table as a GFM pipe table without a trailing newline.
/// Short rows are padded with empty cells.
///
/// ```text
/// | Total | Simulation |
/// | --- | --- |
/// | 2 | 2 |
/// ```
pub fn render_table(table: &HtmlTable, links: &LinkMode) -> String {
    let width = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.header.len()))
        .max()
        .unwrap_or_default();
    if width == 0 {
        return String::new();
    }

    let render = |cells: &[Cell]| -> Vec<String> {
        let mut rendered: Vec<String> = cells.iter().map(|c| render_cell(c, links)).collect();
        rendered.resize(width, String::new());
        rendered
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    lines.push(render_row(&render(&table.header)));
    lines.push(render_row(&vec!["---".to_string(); width]));
    lines.extend(table.rows.iter().map(|row| render_row(&render(row))));
    lines.join("\n")
}

/// Assembles the job summary.
pub fn render_summary(overview: &str, results: &str, detailed_report: Option<&str>) -> String {
    let mut summary = format!("## Summary\n\n{overview}\n\n## Results\n\n{results}\n");
    if let Some(url) = detailed_report {
        summary.push_str(&format!("\n## Detailed report\n\n{url}\n"));
    }
    summary
}
