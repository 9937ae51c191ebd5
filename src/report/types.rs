use serde::{Deserialize, Serialize};

use crate::formatter::StepStatus;

/// Element type counted by the summarizer. Outline templates, backgrounds
/// and other element kinds are excluded.
pub const SCENARIO_KIND: &str = "scenario";

/// One feature from the persisted result document. Field names mirror the
/// JSON produced by the execution engine exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Element {
    pub fn is_scenario(&self) -> bool {
        self.kind == SCENARIO_KIND
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub result: StepResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub status: StepStatus,
    /// Wall time in nanoseconds; absent for hooks and undefined steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_engine_shaped_document() {
        let raw = r#"[
            {
                "name": "Login",
                "elements": [
                    {
                        "name": "Valid credentials",
                        "type": "scenario",
                        "tags": [{"name": "@smoke"}],
                        "steps": [
                            {"result": {"status": "passed", "duration": 1200000}},
                            {"result": {"status": "failed", "duration": 800000, "error_message": "expected dashboard"}}
                        ]
                    },
                    {"name": "Outline template", "type": "scenario_outline", "steps": []}
                ]
            }
        ]"#;
        let features: Vec<Feature> = serde_json::from_str(raw).unwrap();
        assert_eq!(features.len(), 1);
        let feature = &features[0];
        assert_eq!(feature.name, "Login");
        assert_eq!(feature.elements.len(), 2);
        assert!(feature.elements[0].is_scenario());
        assert!(!feature.elements[1].is_scenario());
        let steps = &feature.elements[0].steps;
        assert_eq!(steps[0].result.status, StepStatus::Passed);
        assert_eq!(steps[0].result.duration, Some(1_200_000));
        assert_eq!(
            steps[1].result.error_message.as_deref(),
            Some("expected dashboard")
        );
    }

    #[test]
    fn missing_duration_and_unknown_status_are_tolerated() {
        let raw = r#"[{"name": "F", "elements": [{"name": "S", "type": "scenario",
            "steps": [{"result": {"status": "pending"}}]}]}]"#;
        let features: Vec<Feature> = serde_json::from_str(raw).unwrap();
        let step = &features[0].elements[0].steps[0];
        assert_eq!(step.result.status, StepStatus::Unknown);
        assert_eq!(step.result.duration, None);
    }
}
