//! # Runner Settings Module / 运行器设置模块
//!
//! Optional TOML file with runner options that have no positional argument,
//! such as extra libraries or resource limits. The path comes from `OMLT_SETTINGS`.
//!
//! 可选的 TOML 设置文件，用于提供没有位置参数的运行器选项，例如额外库或资源限制。
//!
//! ```toml
//! optlevel = "-O2"
//! extra_libraries = [["Modelica", "4.0.0"]]
//! ulimit_omc = 660
//! environment_simulation = [["publicData", "$libraryLocation/Tables/"]]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::TestConfig;
use crate::infra::{github::env_non_empty, t};

/// Environment variable naming the settings file.
pub const SETTINGS_ENV: &str = "OMLT_SETTINGS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSettings {
    /// Replaces the default `-Os -march=native`.
    #[serde(default)]
    pub optlevel: Option<String>,
    #[serde(default)]
    pub library_version_name_for_tests: Option<String>,
    #[serde(default)]
    pub library_version_latest_in_package_manager: Option<bool>,
    #[serde(default)]
    pub extra_libraries: Option<Vec<(String, String)>>,
    #[serde(default)]
    pub ignore_model_prefix: Option<String>,
    #[serde(default)]
    pub reference_file_name_extra_name: Option<String>,
    #[serde(default)]
    pub reference_final_dot: Option<String>,
    #[serde(default)]
    pub all_reference_files_exist: Option<bool>,
    #[serde(default)]
    pub sim_code_target: Option<String>,
    #[serde(default)]
    pub ulimit_omc: Option<u64>,
    #[serde(default)]
    pub ulimit_exe: Option<u64>,
    #[serde(default)]
    pub ulimit_memory: Option<u64>,
    #[serde(default)]
    pub alarm_flag: Option<String>,
    #[serde(default)]
    pub abort_slow_simulation: Option<String>,
    #[serde(default)]
    pub extra_custom_commands: Option<Vec<String>>,
    #[serde(default)]
    pub environment_simulation: Option<Vec<(String, String)>>,
    #[serde(default)]
    pub config_extra_name: Option<String>,
}

/// Loads and parses a settings file.
pub fn load_settings(path: &Path) -> Result<RunnerSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| t!("settings.read_failed", path = path.display()))?;
    let settings =
        toml::from_str(&content).with_context(|| t!("settings.parse_failed", path = path.display()))?;
    Ok(settings)
}

/// Loads the settings file named by `OMLT_SETTINGS`, if any.
pub fn settings_from_env() -> Result<Option<RunnerSettings>> {
    env_non_empty(SETTINGS_ENV)
        .map(PathBuf::from)
        .map(|path| load_settings(&path))
        .transpose()
}

impl RunnerSettings {
    /// Copies every field that is set onto `config`.
    pub fn apply(&self, config: &mut TestConfig) {
        fn overlay<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        overlay(&mut config.optlevel, &self.optlevel);
        overlay(
            &mut config.library_version_name_for_tests,
            &self.library_version_name_for_tests,
        );
        overlay(
            &mut config.library_version_latest_in_package_manager,
            &self.library_version_latest_in_package_manager,
        );
        overlay(&mut config.extra_libraries, &self.extra_libraries);
        overlay(&mut config.ignore_model_prefix, &self.ignore_model_prefix);
        overlay(
            &mut config.reference_file_name_extra_name,
            &self.reference_file_name_extra_name,
        );
        overlay(&mut config.reference_final_dot, &self.reference_final_dot);
        overlay(
            &mut config.all_reference_files_exist,
            &self.all_reference_files_exist,
        );
        overlay(&mut config.sim_code_target, &self.sim_code_target);
        overlay(&mut config.ulimit_omc, &self.ulimit_omc);
        overlay(&mut config.ulimit_exe, &self.ulimit_exe);
        overlay(&mut config.ulimit_memory, &self.ulimit_memory);
        overlay(&mut config.alarm_flag, &self.alarm_flag);
        overlay(&mut config.abort_slow_simulation, &self.abort_slow_simulation);
        overlay(&mut config.extra_custom_commands, &self.extra_custom_commands);
        overlay(
            &mut config.environment_simulation,
            &self.environment_simulation,
        );
        overlay(&mut config.config_extra_name, &self.config_extra_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_OPTLEVEL;

    #[test]
    fn parses_settings_and_overlays_config() {
        let settings: RunnerSettings = toml::from_str(
            r#"
            optlevel = "-O2"
            extra_libraries = [["Modelica", "4.0.0"], ["AnotherLib", "main"]]
            ulimit_omc = 660
            extra_custom_commands = ['setCommandLineOptions("-d=-NLSanalyticJacobian")']
            "#,
        )
        .unwrap();

        let mut config = TestConfig {
            library: "MyLibrary".to_string(),
            library_version: "main".to_string(),
            optlevel: Some(DEFAULT_OPTLEVEL.to_string()),
            ..Default::default()
        };
        settings.apply(&mut config);

        assert_eq!(config.optlevel.as_deref(), Some("-O2"));
        assert_eq!(config.ulimit_omc, Some(660));
        assert_eq!(config.extra_libraries.as_ref().map(Vec::len), Some(2));
        assert_eq!(config.ulimit_exe, None);
        assert_eq!(config.library, "MyLibrary");
    }

    #[test]
    fn empty_settings_change_nothing() {
        let mut config = TestConfig {
            optlevel: Some(DEFAULT_OPTLEVEL.to_string()),
            ..Default::default()
        };
        let before = config.clone();
        RunnerSettings::default().apply(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<RunnerSettings, _> = toml::from_str("optlevl = \"-O2\"");
        assert!(result.is_err());
    }
}
