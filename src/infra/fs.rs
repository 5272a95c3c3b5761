//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as copying report directories and resolving absolute paths.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如复制报告目录和解析绝对路径。

use anyhow::{Context, Result};
use fs_extra::dir::{CopyOptions, copy};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::infra::t;

/// Copies the entire content of a source directory into a destination directory.
/// The destination is created when missing and existing files are overwritten.
///
/// # Arguments
/// * `from` - Source directory path
/// * `to` - Destination directory path
///
/// # Returns
/// A `Result` indicating success or failure
pub fn copy_dir_all(from: &Path, to: &Path) -> Result<()> {
    let mut options = CopyOptions::new();
    options.overwrite = true;
    options.copy_inside = true;
    options.content_only = true;
    copy(from, to, &options).with_context(|| {
        t!(
            "fs.copy_dir_failed",
            from = from.display(),
            to = to.display()
        )
    })?;
    Ok(())
}

/// Copies a single file, creating the destination's parent directories first.
/// An existing destination file is overwritten.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    ensure_parent_dir(to)?;
    fs::copy(from, to).with_context(|| {
        t!(
            "fs.copy_file_failed",
            from = from.display(),
            to = to.display()
        )
    })?;
    Ok(())
}

/// Creates the parent directory of `path` if it has one and it does not exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| t!("fs.create_dir_failed", path = parent.display()))?;
    }
    Ok(())
}

/// Checks if a path exists and is a directory.
///
/// # Arguments
/// * `path` - Path to check
///
/// # Returns
/// `true` if the path exists and is a directory, `false` otherwise
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Gets the absolute path from a potentially relative path.
///
/// Unlike `fs::canonicalize` the path does not have to exist. `.` and `..`
/// components are resolved lexically; symlinks are left untouched.
///
/// # Arguments
/// * `path` - Path to make absolute
///
/// # Returns
/// The normalized absolute path, or an error if the current directory is unavailable
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| t!("fs.resolve_path_failed", path = path.display()))?;
    Ok(normalize_lexically(&absolute))
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op.
                if !matches!(
                    normalized.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_)) | None
                ) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_parent_and_current_components() {
        let path = Path::new("/a/b/./c/../d");
        assert_eq!(normalize_lexically(path), PathBuf::from("/a/b/d"));
    }

    #[test]
    fn parent_of_root_stays_root() {
        assert_eq!(normalize_lexically(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn relative_paths_become_absolute() {
        let abs = absolute_path(Path::new("some/dir/../package.mo")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("some/package.mo"));
    }
}
