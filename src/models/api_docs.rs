use serde::{Deserialize, Serialize};

/// One API operation extracted from documentation.
///
/// `(method, path)` is the natural key; extraction never emits duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub parameters: Vec<ApiParameter>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "in", default)]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthKind {
    Bearer,
    ApiKey,
    OAuth2,
    Basic,
    None,
}

/// The single authentication scheme inferred for an API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthScheme {
    pub kind: AuthKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Where the key goes for apiKey schemes ("header", "query", "cookie").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_location: Option<String>,
    /// Only populated when kind is None.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AuthScheme {
    pub fn bearer() -> Self {
        Self {
            kind: AuthKind::Bearer,
            header: Some("Authorization".to_string()),
            key_location: None,
            description: None,
        }
    }

    pub fn api_key(header: &str, location: Option<&str>) -> Self {
        Self {
            kind: AuthKind::ApiKey,
            header: Some(header.to_string()),
            key_location: location.map(str::to_string),
            description: None,
        }
    }

    pub fn oauth2() -> Self {
        Self {
            kind: AuthKind::OAuth2,
            header: Some("Authorization".to_string()),
            key_location: None,
            description: None,
        }
    }

    pub fn basic() -> Self {
        Self {
            kind: AuthKind::Basic,
            header: Some("Authorization".to_string()),
            key_location: None,
            description: None,
        }
    }

    pub fn none() -> Self {
        Self {
            kind: AuthKind::None,
            header: None,
            key_location: None,
            description: Some("Requires manual setup".to_string()),
        }
    }
}

/// Output of the fetch + classify step.
///
/// Exactly one of `raw_spec` / `raw_text` is populated: `raw_spec` when the
/// source was a validated machine-readable spec, `raw_text` when it was
/// free-form HTML (or a spec that failed validation).
#[derive(Debug, Clone)]
pub struct ParsedDocumentation {
    pub endpoints: Vec<ApiEndpoint>,
    pub raw_spec: Option<serde_json::Value>,
    pub raw_text: Option<String>,
}

/// Generated client skeletons, one per target language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapperBundle {
    pub typescript: String,
    pub python: String,
    pub go: String,
}

/// Result of the package-registry lookup.
#[derive(Debug, Clone, Default)]
pub struct SdkInfo {
    pub available: bool,
    pub recommended: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationPath {
    #[serde(rename = "SDK")]
    Sdk,
    #[serde(rename = "REST")]
    Rest,
}

/// Full analysis result returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub endpoints: Vec<ApiEndpoint>,
    pub auth: AuthScheme,
    pub integration_path: IntegrationPath,
    pub recommended_sdk: String,
    pub wrapper_code: WrapperBundle,
    pub analyzed_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_parameter_parses_from_openapi_shape() {
        let param: ApiParameter = serde_json::from_value(json!({
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Ticket ID",
            "schema": { "type": "integer" }
        }))
        .unwrap();

        assert_eq!(param.name, "id");
        assert_eq!(param.location, "path");
        assert!(param.required);
        assert_eq!(param.description, "Ticket ID");
    }

    #[test]
    fn api_endpoint_tolerates_sparse_objects() {
        // LLM-ranked endpoints come back with method/path/description only.
        let endpoint: ApiEndpoint = serde_json::from_value(json!({
            "method": "GET",
            "path": "/tickets"
        }))
        .unwrap();

        assert!(endpoint.parameters.is_empty());
        assert!(endpoint.description.is_empty());
    }

    #[test]
    fn integration_path_uses_wire_labels() {
        assert_eq!(
            serde_json::to_value(IntegrationPath::Sdk).unwrap(),
            json!("SDK")
        );
        assert_eq!(
            serde_json::to_value(IntegrationPath::Rest).unwrap(),
            json!("REST")
        );
    }

    #[test]
    fn auth_scheme_none_carries_setup_note() {
        let auth = AuthScheme::none();
        assert_eq!(auth.kind, AuthKind::None);
        assert!(auth.header.is_none());
        assert_eq!(auth.description.as_deref(), Some("Requires manual setup"));
    }
}
