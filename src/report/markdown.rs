use std::fmt::Write;

use super::summary::{format_duration, ResultSummary};
use crate::utils::config::ReportConfig;

/// Render the summary as the Markdown PR comment. Deterministic: the same
/// summary always produces the same text.
pub fn render_report(summary: &ResultSummary, config: &ReportConfig) -> String {
    let failed = summary.failed_scenarios > 0;
    let mut out = String::new();

    if failed {
        out.push_str("## ❌ E2E Test Results: FAILED\n\n");
    } else {
        out.push_str("## ✅ E2E Test Results: PASSED\n\n");
    }

    out.push_str("| Metric | Value |\n");
    out.push_str("| --- | --- |\n");
    let _ = writeln!(out, "| Scenarios | {} |", summary.total_scenarios);
    let _ = writeln!(out, "| Passed | {} |", summary.passed_scenarios);
    let _ = writeln!(out, "| Failed | {} |", summary.failed_scenarios);
    let _ = writeln!(out, "| Skipped | {} |", summary.skipped_scenarios);
    let _ = writeln!(out, "| Pass rate | {}% |", summary.pass_rate_percent());
    let _ = writeln!(
        out,
        "| Duration | {} |",
        format_duration(summary.duration_nanos)
    );

    if !summary.features.is_empty() {
        out.push_str("\n### Features\n\n");
        out.push_str("| Feature | Scenarios | Passed | Failed | Skipped |\n");
        out.push_str("| --- | --- | --- | --- | --- |\n");
        for entry in &summary.features {
            let icon = if entry.failed > 0 { "❌" } else { "✅" };
            let _ = writeln!(
                out,
                "| {} {} | {} | {} | {} | {} |",
                icon, entry.name, entry.scenario_count, entry.passed, entry.failed, entry.skipped
            );
        }
    }

    if failed {
        out.push_str("\n### Action required\n\n");
        out.push_str(
            "One or more scenarios failed. Review the failure artifacts below and re-run the suite before merging.\n",
        );
    }

    out.push_str("\n### Artifacts\n\n");
    let _ = writeln!(out, "- [HTML report]({})", config.html_report);
    let _ = writeln!(out, "- [Execution logs]({})", config.log_dir);
    if failed {
        let _ = writeln!(out, "- [Failure screenshots]({})", config.screenshot_dir);
        let _ = writeln!(out, "- [Failure videos]({})", config.video_dir);
    }

    out
}
