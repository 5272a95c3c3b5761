//! # Runner Configuration Module / 运行器配置模块
//!
//! Defines the configuration record consumed by OpenModelicaLibraryTesting
//! and writes it as a JSON array with a single entry.
//!
//! 定义 OpenModelicaLibraryTesting 使用的配置记录，
//! 并将其写为只含一个元素的 JSON 数组。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::version::normalize_version;
use crate::infra::{
    fs::{absolute_path, ensure_parent_dir},
    t,
};

/// Compiler optimization flags passed to every test run.
pub const DEFAULT_OPTLEVEL: &str = "-Os -march=native";

/// Location of the reference results used for verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceFiles {
    /// A local directory.
    Path(String),
    /// A git repository the runner clones into `destination`.
    Git { giturl: String, destination: String },
}

/// One test run as understood by the external runner.
/// Unset optional fields are left out of the JSON so the runner applies its own defaults.
///
/// 外部运行器所理解的一次测试运行。未设置的可选字段不会写入 JSON。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
    /// Name of the Modelica library / Modelica 库名称
    pub library: String,
    /// Normalized version or branch label / 规范化后的版本或分支标签
    pub library_version: String,
    /// Commands that load the library into the compiler, e.g. `loadFile("/abs/package.mo")`
    pub load_file_commands: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optlevel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_file_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_file_name_delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_files: Option<ReferenceFiles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_version_name_for_tests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_version_latest_in_package_manager: Option<bool>,
    /// Additional libraries as `(name, version)` pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_libraries: Option<Vec<(String, String)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_model_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_file_name_extra_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_final_dot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_reference_files_exist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sim_code_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ulimit_omc: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ulimit_exe: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ulimit_memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_slow_simulation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_custom_commands: Option<Vec<String>>,
    /// Environment variables for the simulation executable as `(name, value)` pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_simulation: Option<Vec<(String, String)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_extra_name: Option<String>,
}

/// Raw inputs of the config generator, exactly as received on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRequest {
    pub modelica_file: PathBuf,
    pub library: String,
    pub version: String,
    /// Reference-files directory; empty when verification is not wanted.
    pub reference_files: String,
    pub reference_file_extension: String,
    pub reference_file_delimiter: String,
}

impl ConfigRequest {
    pub fn verification_requested(&self) -> bool {
        !self.reference_files.is_empty()
    }
}

impl TestConfig {
    /// Builds the configuration for one library.
    ///
    /// The version label is normalized and all paths are made absolute. Files are
    /// not required to exist; the runner reports missing files itself.
    pub fn from_request(request: &ConfigRequest) -> Result<Self> {
        let modelica_file = absolute_path(&request.modelica_file)?;

        let mut config = TestConfig {
            library: request.library.clone(),
            library_version: normalize_version(&request.version),
            load_file_commands: vec![load_file_command(&modelica_file)],
            optlevel: Some(DEFAULT_OPTLEVEL.to_string()),
            ..Default::default()
        };

        if request.verification_requested() {
            let reference_dir = absolute_path(Path::new(&request.reference_files))?;
            config.reference_file_extension = Some(request.reference_file_extension.clone());
            config.reference_file_name_delimiter = Some(request.reference_file_delimiter.clone());
            config.reference_files = Some(ReferenceFiles::Path(
                reference_dir.to_string_lossy().into_owned(),
            ));
        }

        debug!(library = %config.library, version = %config.library_version, "built test configuration");
        Ok(config)
    }
}

/// Returns the `loadFile("...")` command for a Modelica entry file.
/// On Windows the path is rewritten to the MSYS form the runner's shell expects.
pub fn load_file_command(modelica_file: &Path) -> String {
    let path = modelica_file.to_string_lossy();
    let path = if cfg!(windows) {
        msys_path(&path)
    } else {
        path.into_owned()
    };
    format!("loadFile(\"{path}\")")
}

/// Converts a Windows path like `C:\a\b` to `/c/a/b`.
pub fn msys_path(path: &str) -> String {
    let mut chars = path.chars();
    let converted = match (chars.next(), chars.next(), chars.next()) {
        (Some(drive), Some(':'), Some('\\' | '/')) if drive.is_ascii_alphabetic() => {
            format!("/{}/{}", drive.to_ascii_lowercase(), chars.as_str())
        }
        _ => path.to_string(),
    };
    converted.replace('\\', "/")
}

/// Serializes the configurations as a pretty-printed JSON array.
pub fn render_config(configurations: &[TestConfig]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(configurations)
        .with_context(|| t!("config.serialize_failed"))?;
    json.push('\n');
    Ok(json)
}

/// Writes the configuration file, creating its parent directory if needed.
pub fn write_config_file(path: &Path, configurations: &[TestConfig]) -> Result<()> {
    let json = render_config(configurations)?;
    ensure_parent_dir(path)?;
    fs::write(path, json).with_context(|| t!("config.write_failed", path = path.display()))?;
    Ok(())
}
