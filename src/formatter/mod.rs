pub mod events;
pub mod progress;

pub use events::{RunEvent, StepStatus};
pub use progress::{EventIndex, ProgressFormatter, RunCounters, ScenarioMeta, ScenarioQuery};
