//! Error types for the documentation analysis pipeline.

use thiserror::Error;

/// Errors that can surface at the analysis request boundary.
///
/// Structured-spec parse failures never appear here; they are recovered
/// inside the parser by falling back to the text scan.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Documentation URL is required")]
    InputMissing,

    #[error("Failed to fetch documentation{}: {}", fmt_status(.status), .reason)]
    FetchFailed { status: Option<u16>, reason: String },

    #[error("No valid endpoints found at URL")]
    NoEndpointsFound,

    #[error("Upstream response did not match the expected schema: {0}")]
    UpstreamMalformed(String),

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {code})"),
        None => String::new(),
    }
}

impl AnalysisError {
    /// HTTP status the web layer should report for this error.
    ///
    /// User-correctable problems are 400s; everything else is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InputMissing | Self::NoEndpointsFound => 400,
            Self::FetchFailed { .. } | Self::UpstreamMalformed(_) | Self::Unexpected(_) => 500,
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::FetchFailed {
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::UpstreamMalformed(err.to_string())
    }
}
