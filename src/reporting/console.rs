//! # Console Reporting Module / 控制台报告模块
//!
//! Prints results to the console: colored summaries for humans and
//! workflow-command annotations for the GitHub Actions log.
//!
//! 在控制台打印结果：为用户提供彩色摘要，为 GitHub Actions 日志提供工作流注释。

use colored::*;

use crate::core::models::{TestCategory, TestOutcome};
use crate::infra::{
    github::{Annotation, StepOutputs, annotate},
    t,
};

/// Localized failure message for a category.
pub fn failure_message(category: TestCategory) -> String {
    match category {
        TestCategory::Simulation => t!("summary.simulation_failed").to_string(),
        TestCategory::Verification => t!("summary.verification_failed").to_string(),
    }
}

/// Prints each step output as `name: value`.
///
/// ```text
/// --- Test Results ---
///   simulation-tests-passing: true
///   n-simulation-passing: 2
/// ```
pub fn print_outputs(outputs: &StepOutputs) {
    println!("\n{}", t!("summary.outputs_banner").bold());
    for (name, value) in outputs.entries() {
        let value = match value.as_str() {
            "true" => value.green(),
            "false" => value.red(),
            _ => value.normal(),
        };
        println!("  {}: {}", name, value);
    }
}

/// Annotates every failed category as an error, or prints a notice on success.
pub fn report_outcome(outcome: &TestOutcome) {
    let failures = outcome.failures();
    for category in &failures {
        annotate(Annotation::Error, &failure_message(*category));
    }

    if failures.is_empty() {
        let message = if outcome.verification_requested {
            t!("summary.all_verification_passing")
        } else {
            t!("summary.all_simulation_passing")
        };
        annotate(Annotation::Notice, &message);
        println!("\n{}", t!("summary.passed_banner").green().bold());
    } else {
        println!("\n{}", t!("summary.failed_banner").red().bold());
    }
}

/// Prints a progress line for a produced artifact.
pub fn print_step(message: &str) {
    println!("{}", message.cyan());
}
