use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal status of a step, as reported by the execution engine.
///
/// Unrecognized strings collapse to `Unknown` instead of failing
/// deserialization; they count toward totals but never toward the named
/// passed/failed/skipped buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
    Undefined,
    Ambiguous,
    Unknown,
}

impl StepStatus {
    /// Precedence when aggregating a scenario status from its steps:
    /// failed > skipped > undefined/ambiguous/unknown > passed.
    fn severity(self) -> u8 {
        match self {
            StepStatus::Failed => 3,
            StepStatus::Skipped => 2,
            StepStatus::Undefined | StepStatus::Ambiguous | StepStatus::Unknown => 1,
            StepStatus::Passed => 0,
        }
    }

    /// Worst status across a set of step statuses. An empty set yields
    /// `Passed` by convention.
    pub fn worst_of<I: IntoIterator<Item = StepStatus>>(statuses: I) -> StepStatus {
        statuses
            .into_iter()
            .max_by_key(|status| status.severity())
            .unwrap_or(StepStatus::Passed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Passed => "passed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
            StepStatus::Undefined => "undefined",
            StepStatus::Ambiguous => "ambiguous",
            StepStatus::Unknown => "unknown",
        }
    }
}

impl From<String> for StepStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "passed" => StepStatus::Passed,
            "failed" => StepStatus::Failed,
            "skipped" => StepStatus::Skipped,
            "undefined" => StepStatus::Undefined,
            "ambiguous" => StepStatus::Ambiguous,
            _ => StepStatus::Unknown,
        }
    }
}

impl From<StepStatus> for String {
    fn from(value: StepStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Test execution events for real-time progress updates.
///
/// The engine emits these in strict execution order: `RunStarted` first,
/// then per case `CaseStarted`, its step pairs, `CaseFinished`, and finally
/// `RunFinished`. One NDJSON object per event, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RunEvent {
    #[serde(rename_all = "camelCase")]
    RunStarted { timestamp: DateTime<Utc> },

    #[serde(rename_all = "camelCase")]
    CaseStarted {
        case_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scenario_name: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    StepStarted {
        case_id: String,
        step_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step_text: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    StepFinished {
        case_id: String,
        step_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step_text: Option<String>,
        status: StepStatus,
    },

    #[serde(rename_all = "camelCase")]
    CaseFinished {
        case_id: String,
        worst_step_status: StepStatus,
    },

    #[serde(rename_all = "camelCase")]
    RunFinished { timestamp: DateTime<Utc> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn worst_of_prefers_failed_over_everything() {
        let worst = StepStatus::worst_of([
            StepStatus::Passed,
            StepStatus::Failed,
            StepStatus::Skipped,
        ]);
        assert_eq!(worst, StepStatus::Failed);
    }

    #[test]
    fn worst_of_prefers_skipped_over_passed() {
        let worst = StepStatus::worst_of([
            StepStatus::Passed,
            StepStatus::Skipped,
            StepStatus::Passed,
        ]);
        assert_eq!(worst, StepStatus::Skipped);
    }

    #[test]
    fn worst_of_all_passed_is_passed() {
        let worst = StepStatus::worst_of([StepStatus::Passed, StepStatus::Passed]);
        assert_eq!(worst, StepStatus::Passed);
    }

    #[test]
    fn worst_of_empty_is_passed() {
        assert_eq!(StepStatus::worst_of([]), StepStatus::Passed);
    }

    #[test]
    fn undefined_never_outranks_failed_or_skipped() {
        let worst = StepStatus::worst_of([StepStatus::Undefined, StepStatus::Skipped]);
        assert_eq!(worst, StepStatus::Skipped);
        let worst = StepStatus::worst_of([StepStatus::Failed, StepStatus::Ambiguous]);
        assert_eq!(worst, StepStatus::Failed);
    }

    #[test]
    fn unrecognized_status_string_maps_to_unknown() {
        let status: StepStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, StepStatus::Unknown);
    }

    #[test]
    fn event_lines_round_trip() {
        let line = r#"{"type":"stepFinished","caseId":"c1","stepId":"s1","stepText":"I log in","status":"passed"}"#;
        let event: RunEvent = serde_json::from_str(line).unwrap();
        match &event {
            RunEvent::StepFinished {
                case_id,
                step_id,
                step_text,
                status,
            } => {
                assert_eq!(case_id, "c1");
                assert_eq!(step_id, "s1");
                assert_eq!(step_text.as_deref(), Some("I log in"));
                assert_eq!(*status, StepStatus::Passed);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        let encoded = serde_json::to_string(&event).unwrap();
        assert_eq!(encoded, line);
    }

    #[test]
    fn case_started_without_name_parses() {
        let line = r#"{"type":"caseStarted","caseId":"hook-0"}"#;
        let event: RunEvent = serde_json::from_str(line).unwrap();
        match event {
            RunEvent::CaseStarted { scenario_name, .. } => assert_eq!(scenario_name, None),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
