//! # Result Archiver Command / 结果归档命令
//!
//! Publishes the runner's HTML report as a directory tree or a zip archive and
//! optionally emits the `pages-url` step output.
//!
//! 将运行器的 HTML 报告发布为目录树或 zip 归档，并可选地输出 `pages-url`。

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::{
    core::{
        models::outputs,
        publish::{PublishRequest, PublishTarget, ReportLayout, find_dygraph_script, pages_url, publish},
    },
    infra::{
        github::{Sink, StepOutputs},
        t,
    },
    reporting::console::print_step,
};

/// What the archiver produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub target: PublishTarget,
    pub written: PathBuf,
    pub pages_url: Option<String>,
}

/// Publishes one library report.
///
/// Every source file is checked before the first write.
///
/// # Arguments
/// * `request` - Library, version, OpenModelica branch, runner directory and target
/// * `pages_root` - Root URL of the published pages; enables the `pages-url` output
/// * `output_sink` - Destination of the step output
pub fn execute(
    request: &PublishRequest,
    pages_root: Option<&str>,
    output_sink: &Sink,
) -> Result<ArchiveOutcome> {
    let dygraph = find_dygraph_script(&request.om_lib_testing_dir)?;
    let layout = ReportLayout::resolve(request, dygraph)?;
    debug!(?layout, "resolved report layout");

    let target = PublishTarget::from_path(&request.target);
    let written = publish(&layout, &target)?;
    let message = match target {
        PublishTarget::Directory(_) => t!("archive.copied", path = written.display()),
        PublishTarget::Zip(_) => t!("archive.zipped", path = written.display()),
    };
    print_step(&message);

    let pages_url = pages_root.map(|root| pages_url(root, &layout));
    if let Some(url) = &pages_url {
        let mut step_outputs = StepOutputs::new();
        step_outputs.set(outputs::PAGES_URL, url);
        step_outputs.write_to(output_sink)?;
    }

    Ok(ArchiveOutcome {
        target,
        written,
        pages_url,
    })
}
