//! # OMLT CI Library / OMLT CI 库
//!
//! This library provides the building blocks for the three CI helpers that wrap
//! OpenModelicaLibraryTesting: the config generator, the result archiver and the
//! result summarizer.
//!
//! 此库为封装 OpenModelicaLibraryTesting 的三个 CI 辅助工具提供基础功能：
//! 配置生成器、结果归档器和结果汇总器。
//!
//! ## Modules / 模块
//!
//! - `core` - Runner configuration, version labels, report layout and test outcomes
//! - `infra` - File system, zip archives, GitHub Actions sinks and logging
//! - `reporting` - HTML report parsing, markdown rendering and console output
//! - `cli` - Command-line interfaces of the three binaries
//!
//! - `core` - 运行器配置、版本标签、报告布局和测试结果
//! - `infra` - 文件系统、zip 归档、GitHub Actions 输出和日志
//! - `reporting` - HTML 报告解析、markdown 渲染和控制台输出
//! - `cli` - 三个二进制程序的命令行接口

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::models;
pub use crate::core::version::normalize_version;

/// Environment variable that forces the output language (e.g. `en`, `zh-CN`).
pub const LANG_ENV: &str = "OMLT_LANG";

/// Initializes logging and the application's internationalization (i18n).
///
/// The language is taken from `OMLT_LANG` when set, otherwise from the system
/// locale. The full locale (e.g. "zh-CN") is tried first, then the language
/// part (e.g. "en"), and finally the default language ("en").
///
/// 初始化日志和国际化。语言优先取自 `OMLT_LANG`，否则取系统语言环境。
pub fn init() {
    infra::logging::init_logging();

    let locale = std::env::var(LANG_ENV)
        .ok()
        .filter(|lang| !lang.trim().is_empty())
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    rust_i18n::set_locale(resolve_locale(&locale));
}

/// Picks the best available locale for a requested language tag.
pub fn resolve_locale(requested: &str) -> &'static str {
    let available_locales = rust_i18n::available_locales!();

    let exact = available_locales
        .iter()
        .find(|lang| lang.eq_ignore_ascii_case(requested))
        .copied();
    if let Some(lang) = exact {
        return lang;
    }

    let language = requested
        .split(['-', '_', '.'])
        .next()
        .unwrap_or_default();
    available_locales
        .iter()
        .find(|lang| lang.eq_ignore_ascii_case(language))
        .copied()
        .unwrap_or("en")
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
