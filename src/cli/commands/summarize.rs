//! # Result Summarizer Command / 结果汇总命令
//!
//! Turns `<lib>_<ver>.html` into a markdown job summary, step outputs and a verdict.
//!
//! 将 `<lib>_<ver>.html` 转换为 markdown 作业摘要、步骤输出和测试结论。

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::{
    core::{
        models::TestOutcome,
        version::{lib_name_branch, normalize_version},
    },
    infra::{github::Sink, t},
    reporting::{
        console::{print_outputs, report_outcome},
        html::LibraryReport,
        markdown::{LinkMode, render_summary, render_table},
    },
};

/// Inputs of the result summarizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRequest {
    /// Directory holding `<lib>_<ver>.html`
    pub directory: PathBuf,
    pub library: String,
    /// Raw version label
    pub version: String,
    /// Non-empty when reference files were used, i.e. verification was requested
    pub reference_files: String,
}

impl SummaryRequest {
    pub fn verification_requested(&self) -> bool {
        !self.reference_files.is_empty()
    }

    /// `<directory>/<lib>_<normalized ver>.html`
    pub fn report_path(&self) -> PathBuf {
        let name = lib_name_branch(&self.library, &normalize_version(&self.version));
        self.directory.join(format!("{name}.html"))
    }
}

/// Summarizes one library report.
///
/// The report is parsed completely before the summary and outputs are appended.
///
/// # Arguments
/// * `request` - Report location and whether verification was requested
/// * `report_url` - URL of the published detail page, used for links
/// * `summary_sink` - Destination of the markdown summary
/// * `output_sink` - Destination of the step outputs
///
/// # Returns
/// The evaluated outcome; failing tests are not an error
pub fn execute(
    request: &SummaryRequest,
    report_url: Option<&str>,
    summary_sink: &Sink,
    output_sink: &Sink,
) -> Result<TestOutcome> {
    let path = request.report_path();
    debug!(report = %path.display(), "reading library report");
    let html = fs::read_to_string(&path)
        .with_context(|| t!("summary.read_failed", path = path.display()))?;

    let report = LibraryReport::parse(&html)
        .with_context(|| t!("summary.parse_failed", path = path.display()))?;
    let stats = report
        .overview_stats()
        .with_context(|| t!("summary.parse_failed", path = path.display()))?;
    let outcome = TestOutcome::evaluate(stats, request.verification_requested());
    debug!(?outcome, "evaluated overview");

    let links = LinkMode::for_report_url(report_url);
    let summary = render_summary(
        &render_table(&report.overview, &LinkMode::Strip),
        &render_table(&report.results, &links),
        report_url,
    );

    summary_sink.append(&summary)?;
    let step_outputs = outcome.step_outputs();
    step_outputs.write_to(output_sink)?;

    print_outputs(&step_outputs);
    report_outcome(&outcome);
    Ok(outcome)
}
