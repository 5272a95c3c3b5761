//! # Data Models Module / 数据模型模块
//!
//! Aggregate results read from a library report and the verdict derived from them.
//!
//! 从库报告中读取的汇总结果以及由此得出的结论。

use serde::{Deserialize, Serialize};

use crate::infra::github::StepOutputs;

/// Output names published for the calling workflow.
pub mod outputs {
    pub const SIMULATION_PASSING: &str = "simulation-tests-passing";
    pub const N_SIMULATION_PASSING: &str = "n-simulation-passing";
    pub const VERIFICATION_PASSING: &str = "verification-tests-passing";
    pub const N_VERIFICATION_PASSING: &str = "n-verification-passing";
    pub const PAGES_URL: &str = "pages-url";
}

/// Counts from the overview table of a library report.
/// 库报告概览表中的计数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverviewStats {
    /// Number of tested models / 测试的模型数量
    pub total: u32,
    /// Models that simulated successfully / 仿真成功的模型数量
    pub simulated: u32,
    /// Models whose results matched the reference files / 结果与参考文件一致的模型数量
    pub verified: u32,
}

/// Category of test that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestCategory {
    Simulation,
    Verification,
}

/// Pass/fail verdict of one library test run.
///
/// Verification only counts when it was requested, i.e. when reference files
/// were supplied; otherwise it passes vacuously.
///
/// 一次库测试运行的通过/失败结论。只有在提供了参考文件时才检查验证结果，否则视为通过。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub stats: OverviewStats,
    pub verification_requested: bool,
    pub simulation_passing: bool,
    pub verification_passing: bool,
}

impl TestOutcome {
    pub fn evaluate(stats: OverviewStats, verification_requested: bool) -> Self {
        Self {
            stats,
            verification_requested,
            simulation_passing: stats.total == stats.simulated,
            verification_passing: !verification_requested || stats.total == stats.verified,
        }
    }

    pub fn is_success(&self) -> bool {
        self.simulation_passing && self.verification_passing
    }

    /// Categories that failed, in reporting order.
    pub fn failures(&self) -> Vec<TestCategory> {
        let mut failed = Vec::new();
        if !self.simulation_passing {
            failed.push(TestCategory::Simulation);
        }
        if !self.verification_passing {
            failed.push(TestCategory::Verification);
        }
        failed
    }

    /// The four step outputs of the summarizer.
    pub fn step_outputs(&self) -> StepOutputs {
        let mut step_outputs = StepOutputs::new();
        step_outputs
            .set(outputs::SIMULATION_PASSING, self.simulation_passing)
            .set(outputs::N_SIMULATION_PASSING, self.stats.simulated)
            .set(outputs::VERIFICATION_PASSING, self.verification_passing)
            .set(outputs::N_VERIFICATION_PASSING, self.stats.verified);
        step_outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS: OverviewStats = OverviewStats {
        total: 10,
        simulated: 10,
        verified: 8,
    };

    #[test]
    fn verification_requested_and_failing() {
        let outcome = TestOutcome::evaluate(STATS, true);
        assert!(outcome.simulation_passing);
        assert!(!outcome.verification_passing);
        assert!(!outcome.is_success());
        assert_eq!(outcome.failures(), vec![TestCategory::Verification]);
        assert_eq!(
            outcome.step_outputs().render(),
            "simulation-tests-passing=true\n\
             n-simulation-passing=10\n\
             verification-tests-passing=false\n\
             n-verification-passing=8\n"
        );
    }

    #[test]
    fn verification_not_requested_passes_vacuously() {
        let outcome = TestOutcome::evaluate(STATS, false);
        assert!(outcome.verification_passing);
        assert!(outcome.is_success());
        assert!(outcome.failures().is_empty());
    }

    #[test]
    fn simulation_failure_is_reported_first() {
        let stats = OverviewStats {
            total: 5,
            simulated: 3,
            verified: 2,
        };
        let outcome = TestOutcome::evaluate(stats, true);
        assert_eq!(
            outcome.failures(),
            vec![TestCategory::Simulation, TestCategory::Verification]
        );
    }
}
