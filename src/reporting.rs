//! # Reporting Module / 报告模块
//!
//! This module reads the HTML reports of OpenModelicaLibraryTesting and turns them
//! into markdown job summaries and console output.
//!
//! 此模块读取 OpenModelicaLibraryTesting 的 HTML 报告，
//! 并将其转换为 markdown 作业摘要和控制台输出。

pub mod console;
pub mod html;
pub mod markdown;

// Re-export common reporting functions
pub use console::{print_outputs, report_outcome};
pub use html::{LibraryReport, ReportError};
pub use markdown::{LinkMode, render_summary, render_table};
