//! # Commands / 命令
//!
//! One module per binary. Each `execute` function takes already parsed inputs
//! and explicit sinks so it can be driven from tests.
//!
//! 每个二进制程序对应一个模块。每个 `execute` 函数接收已解析的输入和显式的输出目标。

pub mod archive;
pub mod gen_config;
pub mod summarize;
