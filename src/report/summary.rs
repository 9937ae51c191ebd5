use serde::{Deserialize, Serialize};

use super::types::Feature;
use crate::formatter::StepStatus;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Derived summary of one finished run. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub total_scenarios: u32,
    pub passed_scenarios: u32,
    pub failed_scenarios: u32,
    pub skipped_scenarios: u32,
    pub total_steps: u32,
    pub passed_steps: u32,
    pub failed_steps: u32,
    pub skipped_steps: u32,
    /// Sum of step durations; steps without a duration contribute zero.
    pub duration_nanos: u64,
    /// Per-feature breakdown in document order. Features without any
    /// countable scenario are omitted.
    pub features: Vec<FeatureSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSummary {
    pub name: String,
    pub scenario_count: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl ResultSummary {
    /// Passed scenarios over total, as a percentage. Zero when the document
    /// held no countable scenario.
    pub fn pass_rate(&self) -> f64 {
        if self.total_scenarios == 0 {
            0.0
        } else {
            self.passed_scenarios as f64 * 100.0 / self.total_scenarios as f64
        }
    }

    /// Pass rate rendered to one decimal, e.g. `66.7`.
    pub fn pass_rate_percent(&self) -> String {
        format!("{:.1}", self.pass_rate())
    }
}

/// Reduce the result document into a summary. Pure: the same document always
/// yields the same summary.
pub fn compute_summary(features: &[Feature]) -> ResultSummary {
    let mut summary = ResultSummary::default();

    for feature in features {
        let mut breakdown = FeatureSummary {
            name: feature.name.clone(),
            scenario_count: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
        };

        for element in &feature.elements {
            if !element.is_scenario() {
                continue;
            }

            // A scenario with zero steps aggregates to passed.
            let mut worst = StepStatus::Passed;
            for step in &element.steps {
                summary.total_steps += 1;
                summary.duration_nanos += step.result.duration.unwrap_or(0);
                match step.result.status {
                    StepStatus::Passed => summary.passed_steps += 1,
                    StepStatus::Failed => summary.failed_steps += 1,
                    StepStatus::Skipped => summary.skipped_steps += 1,
                    // Counted toward the total only.
                    _ => {}
                }
                worst = StepStatus::worst_of([worst, step.result.status]);
            }

            summary.total_scenarios += 1;
            breakdown.scenario_count += 1;
            match worst {
                StepStatus::Passed => {
                    summary.passed_scenarios += 1;
                    breakdown.passed += 1;
                }
                StepStatus::Failed => {
                    summary.failed_scenarios += 1;
                    breakdown.failed += 1;
                }
                StepStatus::Skipped => {
                    summary.skipped_scenarios += 1;
                    breakdown.skipped += 1;
                }
                _ => {}
            }
        }

        if breakdown.scenario_count > 0 {
            summary.features.push(breakdown);
        }
    }

    summary
}

/// Seconds with two decimals under a minute, otherwise whole minutes and
/// remaining whole seconds.
pub fn format_duration(nanos: u64) -> String {
    let secs = nanos as f64 / NANOS_PER_SEC as f64;
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let whole = nanos / NANOS_PER_SEC;
        format!("{}m {}s", whole / 60, whole % 60)
    }
}
