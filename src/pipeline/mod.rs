//! The analysis pipeline: fetch, extract, rank, detect, generate.

use tracing::{debug, info};

use crate::auth;
use crate::error::AnalysisError;
use crate::generator;
use crate::matcher;
use crate::models::{AnalysisReport, ApiEndpoint, IntegrationPath, SdkInfo};
use crate::parser::DocParser;
use crate::sdk::SdkDetector;

/// How many endpoints to keep when no use case was given.
const DEFAULT_ENDPOINT_LIMIT: usize = 10;

/// How many endpoints to fall back to when ranking filtered everything out.
const FALLBACK_ENDPOINT_LIMIT: usize = 5;

/// Owns the per-request analysis flow. Stateless between requests: every
/// call builds its endpoint list, auth scheme, and wrapper bundle from
/// scratch.
pub struct AnalysisPipeline {
    parser: DocParser,
    sdk: SdkDetector,
}

impl AnalysisPipeline {
    pub fn new() -> Self {
        Self {
            parser: DocParser::new(),
            sdk: SdkDetector::new(),
        }
    }

    /// Run the full analysis for one documentation URL.
    pub async fn analyze(
        &self,
        url: &str,
        use_case: Option<&str>,
    ) -> Result<AnalysisReport, AnalysisError> {
        if url.trim().is_empty() {
            return Err(AnalysisError::InputMissing);
        }

        let docs = self.parser.parse_documentation(url).await?;
        if docs.endpoints.is_empty() {
            return Err(AnalysisError::NoEndpointsFound);
        }
        info!(count = docs.endpoints.len(), "extracted endpoints");

        let endpoints = select_endpoints(&docs.endpoints, use_case);
        let auth = auth::detect_auth(docs.raw_spec.as_ref(), docs.raw_text.as_deref());
        debug!(kind = ?auth.kind, "detected auth scheme");

        let api_name = SdkDetector::api_name_from_url(url)
            .unwrap_or_else(|| "unknown".to_string());
        let sdk_info: SdkInfo = self.sdk.detect(&api_name).await?;

        let wrapper_code = generator::generate_wrappers(&endpoints, &auth);

        Ok(AnalysisReport {
            endpoints,
            auth,
            integration_path: if sdk_info.available {
                IntegrationPath::Sdk
            } else {
                IntegrationPath::Rest
            },
            recommended_sdk: sdk_info.recommended.unwrap_or_default(),
            wrapper_code,
            analyzed_at: chrono::Utc::now(),
        })
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the endpoints the report (and the wrappers) are built from.
///
/// With a use case: ranked list, or the first few extracted endpoints when
/// ranking filtered everything out. Without one: the first ten.
fn select_endpoints(extracted: &[ApiEndpoint], use_case: Option<&str>) -> Vec<ApiEndpoint> {
    match use_case {
        Some(goal) if !goal.trim().is_empty() => {
            let ranked = matcher::match_endpoints_to_use_case(extracted, goal);
            if ranked.is_empty() {
                extracted
                    .iter()
                    .take(FALLBACK_ENDPOINT_LIMIT)
                    .cloned()
                    .collect()
            } else {
                ranked
            }
        }
        _ => extracted
            .iter()
            .take(DEFAULT_ENDPOINT_LIMIT)
            .cloned()
            .collect(),
    }
}
