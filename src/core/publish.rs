//! # Report Publishing Module / 报告发布模块
//!
//! Knows the layout of the runner's output directory and publishes it either
//! as a directory tree or as a single zip archive:
//!
//! ```text
//! <target>/index.html                                   <- overview.html
//! <target>/<branchOM>/<lib>_<ver>/<lib>_<ver>.html      <- <lib>_<ver>.html
//! <target>/<branchOM>/<lib>_<ver>/files/...             <- files/...
//! <target>/<branchOM>/<lib>_<ver>/files/dygraph-combined.js
//! ```
//!
//! 了解运行器输出目录的布局，并将其发布为目录树或单个 zip 归档。

use anyhow::{Context, Result, bail};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::version::{checked_version, lib_name_branch};
use crate::infra::{
    archive::ArchiveWriter,
    fs::{copy_dir_all, copy_file, is_directory},
    github::env_non_empty,
    t,
};

/// Cross-library overview page written by the runner.
pub const OVERVIEW_FILE: &str = "overview.html";
/// Name of the overview page once published.
pub const INDEX_FILE: &str = "index.html";
/// Directory with per-model logs and diffs.
pub const FILES_DIR: &str = "files";
/// Charting script referenced by the diff pages.
pub const DYGRAPH_FILE: &str = "dygraph-combined.js";
/// Overrides the location of the charting script.
pub const DYGRAPH_ENV: &str = "DYGRAPH_SCRIPT";

/// Inputs of the result archiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub library: String,
    /// Raw version label, normalized by [`ReportLayout::resolve`].
    pub version: String,
    pub branch_om: String,
    pub om_lib_testing_dir: PathBuf,
    pub target: PathBuf,
}

/// Where the report ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    Directory(PathBuf),
    Zip(PathBuf),
}

impl PublishTarget {
    /// Paths ending in `.zip` (any case) select zip mode.
    pub fn from_path(path: &Path) -> Self {
        let is_zip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if is_zip {
            PublishTarget::Zip(path.to_path_buf())
        } else {
            PublishTarget::Directory(path.to_path_buf())
        }
    }
}

/// Validated source files of one library report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub branch_om: String,
    /// `<lib>_<ver>` with the normalized version.
    pub lib_name_branch: String,
    pub files_dir: PathBuf,
    pub overview: PathBuf,
    pub detail_page: PathBuf,
    pub dygraph: PathBuf,
}

impl ReportLayout {
    /// Checks that every source exists before anything is written.
    pub fn resolve(request: &PublishRequest, dygraph: PathBuf) -> Result<Self> {
        let version = checked_version(&request.version)?;
        let lib_name_branch = lib_name_branch(&request.library, &version);
        let root = &request.om_lib_testing_dir;
        let layout = ReportLayout {
            branch_om: request.branch_om.clone(),
            files_dir: root.join(FILES_DIR),
            overview: root.join(OVERVIEW_FILE),
            detail_page: root.join(format!("{lib_name_branch}.html")),
            lib_name_branch,
            dygraph,
        };

        if !is_directory(&layout.files_dir) {
            bail!(t!("publish.missing_source", path = layout.files_dir.display()));
        }
        for file in [&layout.overview, &layout.detail_page, &layout.dygraph] {
            if !file.is_file() {
                bail!(t!("publish.missing_source", path = file.display()));
            }
        }

        Ok(layout)
    }

    /// `<branchOM>/<lib>_<ver>`, relative to the publish root.
    pub fn report_dir(&self) -> String {
        format!("{}/{}", self.branch_om, self.lib_name_branch)
    }

    /// `<branchOM>/<lib>_<ver>/<lib>_<ver>.html`, relative to the publish root.
    pub fn detail_entry(&self) -> String {
        format!("{}/{}.html", self.report_dir(), self.lib_name_branch)
    }

    fn files_entry(&self) -> String {
        format!("{}/{}", self.report_dir(), FILES_DIR)
    }
}

/// Locates `dygraph-combined.js`: `DYGRAPH_SCRIPT`, then the runner directory,
/// then the directory of the running executable.
pub fn find_dygraph_script(om_lib_testing_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = env_non_empty(DYGRAPH_ENV) {
        return Ok(PathBuf::from(path));
    }

    let mut candidates = vec![om_lib_testing_dir.join(DYGRAPH_FILE)];
    if let Some(exe_dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        candidates.push(exe_dir.join(DYGRAPH_FILE));
    }

    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .with_context(|| t!("publish.dygraph_not_found", path = om_lib_testing_dir.display()))
}

/// Publishes the report and returns the written directory or archive path.
pub fn publish(layout: &ReportLayout, target: &PublishTarget) -> Result<PathBuf> {
    match target {
        PublishTarget::Directory(dir) => {
            copy_report(layout, dir)?;
            Ok(dir.clone())
        }
        PublishTarget::Zip(zip) => zip_report(layout, zip),
    }
}

fn copy_report(layout: &ReportLayout, target: &Path) -> Result<()> {
    let report_dir = target.join(&layout.branch_om).join(&layout.lib_name_branch);
    let files_dir = report_dir.join(FILES_DIR);
    debug!(target = %report_dir.display(), "copying report");

    copy_dir_all(&layout.files_dir, &files_dir)?;
    copy_file(&layout.overview, &target.join(INDEX_FILE))?;
    copy_file(
        &layout.detail_page,
        &report_dir.join(format!("{}.html", layout.lib_name_branch)),
    )?;
    copy_file(&layout.dygraph, &files_dir.join(DYGRAPH_FILE))?;

    info!(target = %target.display(), "copied report for {}", layout.lib_name_branch);
    Ok(())
}

fn zip_report(layout: &ReportLayout, zip: &Path) -> Result<PathBuf> {
    debug!(archive = %zip.display(), "zipping report");
    let mut archive = ArchiveWriter::create(zip)?;
    if let Err(e) = add_report_entries(&mut archive, layout) {
        archive.discard();
        return Err(e);
    }

    let path = archive.finish()?;
    info!(archive = %path.display(), "zipped report for {}", layout.lib_name_branch);
    Ok(path)
}

/// The located charting script goes in before `files/`, so it replaces a copy
/// the runner left there, as in directory mode.
fn add_report_entries(archive: &mut ArchiveWriter, layout: &ReportLayout) -> Result<()> {
    archive.add_file(&layout.overview, INDEX_FILE)?;
    archive.add_file(&layout.detail_page, &layout.detail_entry())?;
    archive.add_file(
        &layout.dygraph,
        &format!("{}/{}", layout.files_entry(), DYGRAPH_FILE),
    )?;
    archive.add_dir_all(&layout.files_dir, &layout.files_entry())
}

/// URL of the published detail page below the pages root.
pub fn pages_url(root_url: &str, layout: &ReportLayout) -> String {
    let root = root_url.trim();
    let root = root.strip_suffix('/').unwrap_or(root);
    format!("{root}/{}", layout.detail_entry())
}
