//! Authentication scheme inference.

use serde_json::Value;

use crate::models::AuthScheme;

/// Infer the authentication scheme from structured security metadata
/// and/or page text. Pure; always returns exactly one scheme.
///
/// Structured schemes win over text heuristics, first matching scheme in
/// declaration order. The text pass is case-insensitive and ordered:
/// bearer, api key, oauth2, basic.
pub fn detect_auth(raw_spec: Option<&Value>, page_text: Option<&str>) -> AuthScheme {
    if let Some(schemes) = raw_spec
        .and_then(|spec| spec.pointer("/components/securitySchemes"))
        .and_then(|v| v.as_object())
    {
        for scheme in schemes.values() {
            let scheme_type = scheme.get("type").and_then(|v| v.as_str()).unwrap_or("");
            let http_scheme = scheme.get("scheme").and_then(|v| v.as_str()).unwrap_or("");

            match (scheme_type, http_scheme) {
                ("http", "bearer") => return AuthScheme::bearer(),
                ("apiKey", _) => {
                    let header = scheme
                        .get("name")
                        .and_then(|v| v.as_str())
                        .unwrap_or("x-api-key");
                    let location = scheme.get("in").and_then(|v| v.as_str());
                    return AuthScheme::api_key(header, location);
                }
                ("oauth2", _) => return AuthScheme::oauth2(),
                ("http", "basic") => return AuthScheme::basic(),
                _ => {}
            }
        }
    }

    if let Some(text) = page_text {
        let lower = text.to_lowercase();

        if lower.contains("bearer token") || lower.contains("authorization: bearer") {
            return AuthScheme::bearer();
        }
        if lower.contains("api-key") || lower.contains("x-api-key") || lower.contains("apikey") {
            return AuthScheme::api_key("x-api-key", None);
        }
        if lower.contains("oauth2") || lower.contains("oauth 2") {
            return AuthScheme::oauth2();
        }
        if lower.contains("basic auth") {
            return AuthScheme::basic();
        }
    }

    AuthScheme::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthKind;
    use serde_json::json;

    #[test]
    fn detects_bearer_from_security_schemes() {
        let spec = json!({
            "components": {
                "securitySchemes": {
                    "bearerAuth": { "type": "http", "scheme": "bearer" }
                }
            }
        });

        let auth = detect_auth(Some(&spec), None);
        assert_eq!(auth.kind, AuthKind::Bearer);
        assert_eq!(auth.header.as_deref(), Some("Authorization"));
    }

    #[test]
    fn api_key_scheme_uses_declared_name_and_location() {
        let spec = json!({
            "components": {
                "securitySchemes": {
                    "keyAuth": { "type": "apiKey", "name": "X-Custom-Key", "in": "header" }
                }
            }
        });

        let auth = detect_auth(Some(&spec), None);
        assert_eq!(auth.kind, AuthKind::ApiKey);
        assert_eq!(auth.header.as_deref(), Some("X-Custom-Key"));
        assert_eq!(auth.key_location.as_deref(), Some("header"));
    }

    #[test]
    fn first_scheme_in_declaration_order_wins() {
        let spec = json!({
            "components": {
                "securitySchemes": {
                    "oauth": { "type": "oauth2", "flows": {} },
                    "bearerAuth": { "type": "http", "scheme": "bearer" }
                }
            }
        });

        let auth = detect_auth(Some(&spec), None);
        assert_eq!(auth.kind, AuthKind::OAuth2);
    }

    #[test]
    fn unknown_schemes_are_skipped() {
        let spec = json!({
            "components": {
                "securitySchemes": {
                    "mtls": { "type": "mutualTLS" },
                    "basicAuth": { "type": "http", "scheme": "basic" }
                }
            }
        });

        let auth = detect_auth(Some(&spec), None);
        assert_eq!(auth.kind, AuthKind::Basic);
        assert_eq!(auth.header.as_deref(), Some("Authorization"));
    }

    #[test]
    fn falls_back_to_text_when_spec_declares_no_schemes() {
        let spec = json!({ "openapi": "3.0.0", "paths": {} });
        let text = "Send requests with Authorization: Bearer <token>.";

        let auth = detect_auth(Some(&spec), Some(text));
        assert_eq!(auth.kind, AuthKind::Bearer);
    }

    #[test]
    fn text_heuristics_are_case_insensitive_and_ordered() {
        let auth = detect_auth(None, Some("Pass your API-KEY in every request"));
        assert_eq!(auth.kind, AuthKind::ApiKey);
        assert_eq!(auth.header.as_deref(), Some("x-api-key"));

        // bearer phrasing outranks the api key mention
        let auth = detect_auth(None, Some("Use a Bearer Token. An apikey also works."));
        assert_eq!(auth.kind, AuthKind::Bearer);

        let auth = detect_auth(None, Some("We support OAuth 2 flows"));
        assert_eq!(auth.kind, AuthKind::OAuth2);

        let auth = detect_auth(None, Some("Protected by basic auth"));
        assert_eq!(auth.kind, AuthKind::Basic);
    }

    #[test]
    fn nothing_matched_returns_none_with_instructions() {
        let auth = detect_auth(None, Some("This page says nothing useful."));
        assert_eq!(auth.kind, AuthKind::None);
        assert!(auth.description.is_some());
        assert!(auth.header.is_none());
    }
}
