//! Documentation fetching, classification, and endpoint extraction.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::models::{ApiEndpoint, ApiParameter, ParsedDocumentation};
use crate::parser::text_scan;

/// Method keys recognized on spec path-items.
const SPEC_METHODS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

/// Bound on `$ref` chain resolution.
const MAX_REF_DEPTH: usize = 8;

/// Fetches documentation content and turns it into a [`ParsedDocumentation`].
pub struct DocParser {
    client: reqwest::Client,
}

impl DocParser {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap(),
        }
    }

    /// Fetch the documentation at `url` and extract its endpoints.
    ///
    /// One request, no retries. Status >= 400 and transport errors surface
    /// as [`AnalysisError::FetchFailed`]; everything after the fetch is
    /// infallible and degrades to the text scan instead of raising.
    pub async fn parse_documentation(
        &self,
        url: &str,
    ) -> Result<ParsedDocumentation, AnalysisError> {
        debug!(url, "fetching documentation");
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(AnalysisError::FetchFailed {
                status: Some(status),
                reason: "documentation fetch returned an error status".to_string(),
            });
        }

        let content = response.text().await?;
        debug!(bytes = content.len(), "fetched documentation content");

        Ok(classify_and_extract(&content))
    }
}

impl Default for DocParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify fetched content and extract endpoints from it.
///
/// JSON bodies carrying an `openapi`/`swagger` marker go down the
/// structured path when they validate; everything else (including specs
/// that fail validation) is scanned as text.
pub fn classify_and_extract(content: &str) -> ParsedDocumentation {
    if let Ok(candidate) = serde_json::from_str::<Value>(content) {
        if candidate.get("openapi").is_some() || candidate.get("swagger").is_some() {
            match validate_spec(&candidate) {
                Ok(()) => {
                    let endpoints = extract_spec_endpoints(&candidate);
                    return ParsedDocumentation {
                        endpoints,
                        raw_spec: Some(candidate),
                        raw_text: None,
                    };
                }
                Err(reason) => {
                    warn!(%reason, "spec validation failed, falling back to text scan");
                }
            }
        }
    }

    let endpoints = text_scan::scan_endpoints(&text_scan::visible_text(content));
    ParsedDocumentation {
        endpoints,
        raw_spec: None,
        raw_text: Some(content.to_string()),
    }
}

/// Check that a candidate document is a usable OpenAPI/Swagger spec.
pub fn validate_spec(raw: &Value) -> Result<(), String> {
    let Some(obj) = raw.as_object() else {
        return Err("document is not a JSON object".to_string());
    };

    match obj.get("openapi").or_else(|| obj.get("swagger")) {
        Some(version) if version.is_string() => {}
        Some(_) => return Err("version field is not a string".to_string()),
        None => return Err("missing openapi/swagger version field".to_string()),
    }

    match obj.get("paths") {
        Some(paths) if paths.is_object() => Ok(()),
        Some(_) => Err("paths is not an object".to_string()),
        None => Err("missing paths object".to_string()),
    }
}

/// Extract one endpoint per (path, method) operation from a validated spec.
///
/// Deduplicated by (method, path); path-items iterate in declaration order.
pub fn extract_spec_endpoints(spec: &Value) -> Vec<ApiEndpoint> {
    let mut endpoints = Vec::new();
    let mut seen = HashSet::new();

    let Some(paths) = spec.get("paths").and_then(|p| p.as_object()) else {
        return endpoints;
    };

    for (path, path_item) in paths {
        let Some(item) = path_item.as_object() else {
            continue;
        };

        for (key, operation) in item {
            let lower = key.to_ascii_lowercase();
            if !SPEC_METHODS.contains(&lower.as_str()) {
                continue;
            }

            let method = lower.to_ascii_uppercase();
            if !seen.insert((method.clone(), path.clone())) {
                continue;
            }

            let description = operation
                .get("summary")
                .or_else(|| operation.get("description"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            endpoints.push(ApiEndpoint {
                method,
                path: path.clone(),
                parameters: extract_parameters(spec, operation),
                description,
            });
        }
    }

    endpoints
}

fn extract_parameters(spec: &Value, operation: &Value) -> Vec<ApiParameter> {
    operation
        .get("parameters")
        .and_then(|v| v.as_array())
        .map(|params| {
            params
                .iter()
                .filter_map(|param| parse_parameter(resolve_ref(spec, param)))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_parameter(param: &Value) -> Option<ApiParameter> {
    serde_json::from_value(param.clone()).ok()
}

/// Follow local `#/` refs against the document root, bounded against cycles.
///
/// Unresolvable refs return the node unchanged; the parameter parse then
/// rejects it.
fn resolve_ref<'a>(root: &'a Value, value: &'a Value) -> &'a Value {
    let mut current = value;

    for _ in 0..MAX_REF_DEPTH {
        let Some(pointer) = current.get("$ref").and_then(|r| r.as_str()) else {
            return current;
        };
        match pointer.strip_prefix('#').and_then(|p| root.pointer(p)) {
            Some(resolved) => current = resolved,
            None => return current,
        }
    }

    current
}
