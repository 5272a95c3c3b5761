//! # Config Generator Command / 配置生成命令
//!
//! Writes the OpenModelicaLibraryTesting configuration for one library.
//!
//! 为单个库写入 OpenModelicaLibraryTesting 配置。

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::{
    core::{
        config::{ConfigRequest, TestConfig, render_config, write_config_file},
        settings::RunnerSettings,
    },
    infra::t,
    reporting::console::print_step,
};

/// Builds the configuration, overlays optional settings and writes `config_file`.
///
/// # Arguments
/// * `config_file` - Path of the JSON file to write
/// * `request` - Raw command-line inputs
/// * `settings` - Optional runner settings loaded from `OMLT_SETTINGS`
///
/// # Returns
/// The configuration that was written
pub fn execute(
    config_file: &Path,
    request: &ConfigRequest,
    settings: Option<&RunnerSettings>,
) -> Result<TestConfig> {
    let mut config = TestConfig::from_request(request)?;
    if let Some(settings) = settings {
        settings.apply(&mut config);
    }

    let configurations = std::slice::from_ref(&config);
    write_config_file(config_file, configurations)?;

    let json = render_config(configurations)?;
    info!("{}:\n{}", config_file.display(), json);
    print_step(&t!("config.written", path = config_file.display()));
    Ok(config)
}
