use std::path::PathBuf;

/// Report output locations. Fixed per repository layout; the PR comment is
/// overwritten on every run.
pub struct ReportConfig {
    /// Where the Markdown PR comment is written.
    pub comment_path: PathBuf,

    /// Link target for the themed HTML report.
    pub html_report: String,

    /// Link target for raw execution logs.
    pub log_dir: String,

    /// Link target for failure screenshots, shown only on failed runs.
    pub screenshot_dir: String,

    /// Link target for failure videos, shown only on failed runs.
    pub video_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            comment_path: PathBuf::from("reports/pr-comment.md"),
            html_report: "reports/html/index.html".to_string(),
            log_dir: "reports/logs".to_string(),
            screenshot_dir: "reports/screenshots".to_string(),
            video_dir: "reports/videos".to_string(),
        }
    }
}
