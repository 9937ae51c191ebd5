pub mod markdown;
pub mod summary;
pub mod types;

use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::utils::config::ReportConfig;

pub use summary::{compute_summary, format_duration, FeatureSummary, ResultSummary};

#[derive(Debug, Error)]
pub enum ReportError {
    /// The result document was never produced or cannot be read.
    #[error("result document not readable at {path}: {source}")]
    MissingArtifact {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("result document at {path} is not valid JSON: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write report comment to {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Load the persisted result document, derive the summary, and write the
/// Markdown PR comment. The comment file is overwritten on every run.
///
/// A missing or unreadable document is fatal and propagated to the caller;
/// nothing is retried locally.
pub fn generate_report(
    results_path: &Path,
    output: Option<&Path>,
) -> Result<ResultSummary, ReportError> {
    let config = ReportConfig::default();

    let raw =
        std::fs::read_to_string(results_path).map_err(|source| ReportError::MissingArtifact {
            path: results_path.display().to_string(),
            source,
        })?;
    let features: Vec<types::Feature> =
        serde_json::from_str(&raw).map_err(|source| ReportError::Malformed {
            path: results_path.display().to_string(),
            source,
        })?;

    let summary = compute_summary(&features);
    let comment = markdown::render_report(&summary, &config);

    let target = output.unwrap_or_else(|| config.comment_path.as_path());
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ReportError::WriteFailed {
                path: target.display().to_string(),
                source,
            })?;
        }
    }
    std::fs::write(target, comment).map_err(|source| ReportError::WriteFailed {
        path: target.display().to_string(),
        source,
    })?;
    debug!("report comment written to {}", target.display());

    Ok(summary)
}
