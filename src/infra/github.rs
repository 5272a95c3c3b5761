//! # GitHub Actions Module / GitHub Actions 模块
//!
//! Writes step outputs (`GITHUB_OUTPUT`), the job summary (`GITHUB_STEP_SUMMARY`)
//! and workflow commands such as `::error::`. When a sink variable is not set the
//! content goes to stdout, which keeps the tools usable outside of a runner.
//!
//! 写入步骤输出、作业摘要和工作流命令。未设置相应环境变量时输出到标准输出。

use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::infra::{fs::ensure_parent_dir, t};

/// File receiving `name=value` step outputs.
pub const OUTPUT_ENV: &str = "GITHUB_OUTPUT";
/// File receiving the markdown job summary.
pub const STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

/// An append-only destination for CI output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// Append to this file.
    File(PathBuf),
    /// Print to stdout.
    Stdout,
}

impl Sink {
    /// Builds the sink named by the environment variable `var`.
    pub fn from_env(var: &str) -> Self {
        let sink = Self::from_value(env::var_os(var).map(PathBuf::from));
        if sink == Sink::Stdout {
            warn!("{var} is not set, writing to stdout instead");
        }
        sink
    }

    /// Builds a sink from an optional path; an empty path means stdout.
    pub fn from_value(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Sink::File(path),
            _ => Sink::Stdout,
        }
    }

    /// Appends `text` verbatim.
    pub fn append(&self, text: &str) -> Result<()> {
        match self {
            Sink::File(path) => append_to_file(path, text),
            Sink::Stdout => {
                print!("{text}");
                std::io::stdout()
                    .flush()
                    .with_context(|| t!("github.stdout_failed"))?;
                Ok(())
            }
        }
    }
}

fn append_to_file(path: &Path, text: &str) -> Result<()> {
    debug!(path = %path.display(), bytes = text.len(), "appending to CI sink");
    ensure_parent_dir(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| t!("github.sink_open_failed", path = path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| t!("github.sink_write_failed", path = path.display()))?;
    Ok(())
}

/// Collects step outputs and writes them as `name=value` lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepOutputs {
    entries: Vec<(String, String)>,
}

impl StepOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one output. Booleans render as `true`/`false`.
    pub fn set(&mut self, name: &str, value: impl Display) -> &mut Self {
        self.entries.push((name.to_string(), value.to_string()));
        self
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Renders all outputs in the `GITHUB_OUTPUT` line format.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{name}={value}\n"))
            .collect()
    }

    pub fn write_to(&self, sink: &Sink) -> Result<()> {
        sink.append(&self.render())
    }
}

/// Severity of a workflow command annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Error,
    Warning,
    Notice,
}

impl Annotation {
    fn command(self) -> &'static str {
        match self {
            Annotation::Error => "error",
            Annotation::Warning => "warning",
            Annotation::Notice => "notice",
        }
    }
}

/// Formats a workflow command, e.g. `::error::Simulation tests failed.`
pub fn workflow_command(kind: Annotation, message: &str) -> String {
    // Newlines must be escaped or the runner cuts the annotation short.
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::{}::{}", kind.command(), escaped)
}

/// Prints a workflow command annotation to stdout.
pub fn annotate(kind: Annotation, message: &str) {
    println!("{}", workflow_command(kind, message));
}

/// Reads a boolean flag from the environment. `true` in any case and `1` are true.
pub fn env_flag(var: &str) -> bool {
    env::var(var).map(|v| str_to_bool(&v)).unwrap_or(false)
}

pub fn str_to_bool(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Reads a non-empty, trimmed environment variable.
pub fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
