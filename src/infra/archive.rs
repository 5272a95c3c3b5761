//! # Zip Archive Module / Zip 归档模块
//!
//! Thin wrapper around `zip::ZipWriter` used to pack report artifacts into a
//! single archive with `/`-separated entry names on every platform. The archive
//! is written next to its destination as `<name>.partial` and only renamed into
//! place by [`ArchiveWriter::finish`].
//!
//! 对 `zip::ZipWriter` 的简单封装，用于将报告产物打包成单个归档文件。

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::infra::{fs::ensure_parent_dir, t};

/// Incrementally writes a deflate-compressed zip archive.
pub struct ArchiveWriter {
    zip: ZipWriter<File>,
    options: SimpleFileOptions,
    path: PathBuf,
    partial: PathBuf,
    entries: HashSet<String>,
}

impl ArchiveWriter {
    /// Starts an archive that will be moved to `path` on [`finish`](Self::finish).
    /// Parent directories are created; an existing archive stays untouched until then.
    pub fn create(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;
        let partial = partial_path(path);
        let file = File::create(&partial)
            .with_context(|| t!("archive.create_failed", path = partial.display()))?;
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        Ok(Self {
            zip: ZipWriter::new(file),
            options,
            path: path.to_path_buf(),
            partial,
            entries: HashSet::new(),
        })
    }

    /// Whether an entry with this name was already written.
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    /// Adds the file at `source` under the archive entry name `entry`.
    pub fn add_file(&mut self, source: &Path, entry: &str) -> Result<()> {
        debug!(entry, source = %source.display(), "adding archive entry");
        self.entries.insert(entry.to_string());
        let mut input = File::open(source)
            .with_context(|| t!("archive.read_failed", path = source.display()))?;
        self.zip
            .start_file(entry, self.options)
            .with_context(|| t!("archive.write_failed", path = self.path.display()))?;
        io::copy(&mut input, &mut self.zip)
            .with_context(|| t!("archive.write_failed", path = self.path.display()))?;
        Ok(())
    }

    /// Recursively adds the content of `source` below the entry prefix `prefix`.
    /// Entries are added in file-name order so archives are reproducible.
    /// Files whose entry name was already written are skipped.
    pub fn add_dir_all(&mut self, source: &Path, prefix: &str) -> Result<()> {
        let prefix = prefix.trim_end_matches('/');
        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry =
                entry.with_context(|| t!("archive.read_failed", path = source.display()))?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .with_context(|| t!("archive.read_failed", path = entry.path().display()))?;
            let name = entry_name(prefix, relative);

            if entry.file_type().is_dir() {
                let dir_name = format!("{name}/");
                if self.entries.insert(dir_name.clone()) {
                    self.zip
                        .add_directory(dir_name, self.options)
                        .with_context(|| t!("archive.write_failed", path = self.path.display()))?;
                }
            } else if self.contains(&name) {
                debug!(entry = %name, "skipping entry that is already in the archive");
            } else {
                self.add_file(entry.path(), &name)?;
            }
        }
        Ok(())
    }

    /// Writes the central directory and moves the archive to its destination.
    pub fn finish(self) -> Result<PathBuf> {
        let Self {
            zip, path, partial, ..
        } = self;
        // The file handle is closed before the rename.
        let written = zip
            .finish()
            .map(drop)
            .with_context(|| t!("archive.write_failed", path = path.display()));
        if let Err(e) = written {
            remove_partial(&partial);
            return Err(e);
        }

        if let Err(e) = fs::rename(&partial, &path) {
            remove_partial(&partial);
            return Err(e).with_context(|| t!("archive.rename_failed", path = path.display()));
        }
        Ok(path)
    }

    /// Drops the unfinished archive, leaving any previous one at the destination.
    pub fn discard(self) {
        let Self { zip, partial, .. } = self;
        drop(zip);
        remove_partial(&partial);
    }
}

/// `<dir>/html.zip` -> `<dir>/html.zip.partial`
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

fn remove_partial(partial: &Path) {
    if let Err(e) = fs::remove_file(partial) {
        warn!(path = %partial.display(), "failed to remove unfinished archive: {e}");
    }
}

/// Joins an entry prefix and a relative path using `/` separators.
pub fn entry_name(prefix: &str, relative: &Path) -> String {
    let mut name = prefix.trim_end_matches('/').to_string();
    for component in relative.components() {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}
