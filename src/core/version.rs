//! # Version Label Module / 版本标签模块
//!
//! Normalizes library version and branch labels before they are used in
//! file names, paths, URLs or the runner configuration.
//!
//! 在版本和分支标签被用于文件名、路径、URL 或运行器配置之前对其进行规范化。

use anyhow::{Result, bail};

use crate::infra::t;

/// Suffix of the ref GitHub checks out for pull-request builds.
const MERGE_SUFFIX: &str = "/merge";
/// Prefix given to pull-request labels.
const PR_PREFIX: &str = "dev-pr-";

/// Returns the normalized form of a version label.
///
/// - `<n>/merge`, `pull/<n>/merge` and `refs/pull/<n>/merge` become `dev-pr-<n>`
/// - every remaining `/` is replaced with `-`
///
/// The result never contains `/`, so pull-request artifacts cannot collide
/// with branch artifacts or create nested directories.
///
/// - `<n>/merge`、`pull/<n>/merge` 和 `refs/pull/<n>/merge` 变为 `dev-pr-<n>`
/// - 其余的 `/` 全部替换为 `-`
///
/// # Examples
/// ```
/// use omlt_ci::normalize_version;
///
/// assert_eq!(normalize_version("42/merge"), "dev-pr-42");
/// assert_eq!(normalize_version("refs/pull/42/merge"), "dev-pr-42");
/// assert_eq!(normalize_version("main"), "main");
/// assert_eq!(normalize_version("release/v1.0"), "release-v1.0");
/// ```
///
/// A ref without a number (`/merge`) yields the bare `dev-pr-`; use
/// [`checked_version`] where the label names published artifacts.
pub fn normalize_version(label: &str) -> String {
    match pull_request_number(label) {
        Some(pr) => format!("{PR_PREFIX}{}", pr.replace('/', "-")),
        None => label.replace('/', "-"),
    }
}

/// Like [`normalize_version`], but rejects an empty label and a pull-request
/// ref without a number.
///
/// ```
/// use omlt_ci::core::version::checked_version;
///
/// assert_eq!(checked_version("7/merge").unwrap(), "dev-pr-7");
/// assert!(checked_version("/merge").is_err());
/// assert!(checked_version("  ").is_err());
/// ```
pub fn checked_version(label: &str) -> Result<String> {
    if label.trim().is_empty() {
        bail!(t!("version.empty"));
    }
    if pull_request_number(label).is_some_and(|pr| pr.trim().is_empty()) {
        bail!(t!("version.missing_pr_number", label = label));
    }
    Ok(normalize_version(label))
}

/// The part of `<n>/merge`, `pull/<n>/merge` or `refs/pull/<n>/merge` before `/merge`.
fn pull_request_number(label: &str) -> Option<&str> {
    let pr = label.strip_suffix(MERGE_SUFFIX)?;
    let pr = pr.strip_prefix("refs/").unwrap_or(pr);
    Some(pr.strip_prefix("pull/").unwrap_or(pr))
}

/// Joins a library name and a normalized version as used in report file names,
/// e.g. `MyLibrary_main`.
pub fn lib_name_branch(library: &str, version: &str) -> String {
    format!("{library}_{version}")
}
