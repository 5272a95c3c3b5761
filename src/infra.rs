//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the CI helpers,
//! including file system operations, zip archives, GitHub Actions sinks and logging.
//!
//! 此模块为 CI 辅助工具提供基础设施服务，
//! 包括文件系统操作、zip 归档、GitHub Actions 输出和日志。

pub mod archive;
pub mod fs;
pub mod github;
pub mod logging;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
