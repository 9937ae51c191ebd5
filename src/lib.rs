pub mod formatter;
pub mod report;
pub mod utils;

// Re-export common items
pub use formatter::{EventIndex, ProgressFormatter, RunEvent, StepStatus};
pub use report::{generate_report, ReportError, ResultSummary};
