use std::collections::HashMap;
use std::io::{self, Write};

use chrono::{DateTime, Utc};

use super::events::{RunEvent, StepStatus};

// Cursor to line start followed by clear to end of line. Together they
// overwrite the pending step marker in place.
const LINE_REWRITE: &str = "\r\x1b[K";

/// Scenario metadata returned by the engine lookup.
#[derive(Debug, Clone)]
pub struct ScenarioMeta {
    pub name: String,
    pub tags: Vec<String>,
}

/// Lookup capability provided by the event source: maps opaque case and step
/// identifiers back to display metadata.
///
/// Both lookups may miss (hook-level cases carry no scenario mapping); the
/// formatter degrades by skipping the emission for that event only.
pub trait ScenarioQuery {
    fn resolve_scenario(&self, case_id: &str) -> Option<ScenarioMeta>;
    fn resolve_step_text(&self, case_id: &str, step_id: &str) -> Option<String>;
}

/// Query backed by the event stream itself: names are recorded as events
/// carry them, so a replayed stream resolves its own identifiers.
#[derive(Debug, Default)]
pub struct EventIndex {
    scenarios: HashMap<String, ScenarioMeta>,
    step_texts: HashMap<(String, String), String>,
}

impl EventIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record any display names the event carries. Call before handing the
    /// event to the formatter.
    pub fn observe(&mut self, event: &RunEvent) {
        match event {
            RunEvent::CaseStarted {
                case_id,
                scenario_name: Some(name),
            } => {
                self.scenarios.insert(
                    case_id.clone(),
                    ScenarioMeta {
                        name: name.clone(),
                        tags: Vec::new(),
                    },
                );
            }
            RunEvent::StepStarted {
                case_id,
                step_id,
                step_text: Some(text),
            }
            | RunEvent::StepFinished {
                case_id,
                step_id,
                step_text: Some(text),
                ..
            } => {
                self.step_texts
                    .insert((case_id.clone(), step_id.clone()), text.clone());
            }
            _ => {}
        }
    }
}

impl ScenarioQuery for EventIndex {
    fn resolve_scenario(&self, case_id: &str) -> Option<ScenarioMeta> {
        self.scenarios.get(case_id).cloned()
    }

    fn resolve_step_text(&self, case_id: &str, step_id: &str) -> Option<String> {
        self.step_texts
            .get(&(case_id.to_string(), step_id.to_string()))
            .cloned()
    }
}

/// Aggregate counters for one run. Owned by the formatter and constructed
/// fresh per run; there is no reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub total_scenarios: u32,
    pub scenarios_passed: u32,
    pub scenarios_failed: u32,
    pub scenarios_skipped: u32,
    pub total_steps: u32,
    pub steps_passed: u32,
    pub steps_failed: u32,
    pub steps_skipped: u32,
}

/// Console formatter for live test execution.
///
/// Consumes the strictly ordered event stream one event at a time and writes
/// progress to `out`: a running header per scenario, a pending marker per
/// step that is overwritten in place once the step finishes, and a final
/// multi-line summary at run end.
pub struct ProgressFormatter<W> {
    out: W,
    counters: RunCounters,
    started_at: Option<DateTime<Utc>>,
}

impl<W: Write> ProgressFormatter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            counters: RunCounters::default(),
            started_at: None,
        }
    }

    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Feed the next event. Events must arrive in execution order; each call
    /// runs to completion before the next event is handed in.
    pub fn handle(&mut self, event: &RunEvent, query: &dyn ScenarioQuery) -> io::Result<()> {
        match event {
            RunEvent::RunStarted { timestamp } => {
                self.started_at = Some(*timestamp);
                Ok(())
            }

            RunEvent::CaseStarted { case_id, .. } => match query.resolve_scenario(case_id) {
                Some(meta) => writeln!(self.out, "\n▶️  Running: {}", meta.name),
                // No scenario mapping, e.g. a hook-level case.
                None => Ok(()),
            },

            RunEvent::StepStarted {
                case_id, step_id, ..
            } => {
                if let Some(text) = query.resolve_step_text(case_id, step_id) {
                    write!(self.out, "  ⏳ {}", text)?;
                    self.out.flush()?;
                }
                Ok(())
            }

            RunEvent::StepFinished {
                case_id,
                step_id,
                status,
                ..
            } => {
                let Some(text) = query.resolve_step_text(case_id, step_id) else {
                    // Unresolvable step: nothing shown, nothing counted.
                    return Ok(());
                };
                self.counters.total_steps += 1;
                let icon = match status {
                    StepStatus::Passed => {
                        self.counters.steps_passed += 1;
                        "✅"
                    }
                    StepStatus::Failed => {
                        self.counters.steps_failed += 1;
                        "❌"
                    }
                    StepStatus::Skipped => {
                        self.counters.steps_skipped += 1;
                        "⊘"
                    }
                    _ => "⚠️",
                };
                writeln!(self.out, "{}  {} {}", LINE_REWRITE, icon, text)
            }

            RunEvent::CaseFinished {
                worst_step_status, ..
            } => {
                self.counters.total_scenarios += 1;
                match worst_step_status {
                    StepStatus::Passed => self.counters.scenarios_passed += 1,
                    StepStatus::Failed => self.counters.scenarios_failed += 1,
                    StepStatus::Skipped => self.counters.scenarios_skipped += 1,
                    // Undefined/ambiguous scenarios stay out of the three
                    // buckets but still count toward the total.
                    _ => {}
                }
                Ok(())
            }

            RunEvent::RunFinished { timestamp } => self.write_summary(*timestamp),
        }
    }

    fn write_summary(&mut self, finished_at: DateTime<Utc>) -> io::Result<()> {
        let elapsed = self
            .started_at
            .map(|start| (finished_at - start).num_milliseconds().max(0) as f64 / 1000.0)
            .unwrap_or(0.0);
        let c = self.counters;
        writeln!(self.out, "\n📊 Test run finished")?;
        writeln!(
            self.out,
            "{}",
            status_line(
                c.total_scenarios,
                "scenarios",
                c.scenarios_passed,
                c.scenarios_failed,
                c.scenarios_skipped
            )
        )?;
        writeln!(
            self.out,
            "{}",
            status_line(
                c.total_steps,
                "steps",
                c.steps_passed,
                c.steps_failed,
                c.steps_skipped
            )
        )?;
        writeln!(self.out, "{:.3}s", elapsed)
    }
}

/// `<total> <noun> (<passed> passed[, <failed> failed][, <skipped> skipped])`
/// with the failed/skipped clauses present only when non-zero.
fn status_line(total: u32, noun: &str, passed: u32, failed: u32, skipped: u32) -> String {
    let mut clauses = format!("{} passed", passed);
    if failed > 0 {
        clauses.push_str(&format!(", {} failed", failed));
    }
    if skipped > 0 {
        clauses.push_str(&format!(", {} skipped", skipped));
    }
    format!("{} {} ({})", total, noun, clauses)
}
