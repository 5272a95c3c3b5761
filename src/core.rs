//! # Core Module / 核心模块
//!
//! This module contains the domain logic of the CI helpers:
//! runner configuration, version labels, report publishing and test outcomes.
//!
//! 此模块包含 CI 辅助工具的领域逻辑：
//! 运行器配置、版本标签、报告发布和测试结果。

pub mod config;
pub mod models;
pub mod publish;
pub mod settings;
pub mod version;

// Re-exports
pub use config::TestConfig;
pub use models::TestOutcome;
pub use version::normalize_version;
