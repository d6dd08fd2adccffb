//! Client wrapper rendering for TypeScript, Python, and Go.
//!
//! All three renderers share one naming scheme and emit the same shape:
//! a client type holding the API key and base URL, a header builder, and
//! one method per endpoint returning the parsed response body. Output is
//! source text only; it is never executed or syntax-checked here.

use std::collections::HashMap;

use crate::models::{ApiEndpoint, AuthKind, AuthScheme, WrapperBundle};

/// Generated method names are capped so they stay readable.
const MAX_IDENT_LEN: usize = 30;

/// Render the three wrapper skeletons for the given endpoints and auth.
pub fn generate_wrappers(endpoints: &[ApiEndpoint], auth: &AuthScheme) -> WrapperBundle {
    let idents = unique_identifiers(endpoints);

    WrapperBundle {
        typescript: render_typescript(endpoints, &idents, auth),
        python: render_python(endpoints, &idents, auth),
        go: render_go(endpoints, &idents, auth),
    }
}

/// Derive the shared method identifier for an endpoint.
///
/// Lower-cased HTTP method, then the path with `/`, `-`, `_`, `{`, `}`
/// stripped, truncated to 30 characters. Deterministic, and valid as an
/// identifier in all three target languages.
pub fn method_identifier(endpoint: &ApiEndpoint) -> String {
    let stripped: String = endpoint
        .path
        .chars()
        .filter(|c| !matches!(c, '/' | '-' | '_' | '{' | '}'))
        .collect();

    format!("{}{}", endpoint.method.to_lowercase(), stripped)
        .chars()
        .take(MAX_IDENT_LEN)
        .collect()
}

/// One identifier per endpoint, in order. Truncation can make two distinct
/// endpoints collide; later occurrences get a numeric suffix.
fn unique_identifiers(endpoints: &[ApiEndpoint]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    endpoints
        .iter()
        .map(|endpoint| {
            let base = method_identifier(endpoint);
            let n = counts
                .entry(base.clone())
                .and_modify(|n| *n += 1)
                .or_insert(1);
            if *n == 1 { base } else { format!("{base}{n}") }
        })
        .collect()
}

/// The auth header to emit, if any: (header name, value prefix).
///
/// No header name means no auth line at all; only Bearer gets a prefix.
fn auth_header(auth: &AuthScheme) -> Option<(&str, &'static str)> {
    let header = auth.header.as_deref().filter(|h| !h.is_empty())?;
    let prefix = if auth.kind == AuthKind::Bearer {
        "Bearer "
    } else {
        ""
    };
    Some((header, prefix))
}

fn render_typescript(endpoints: &[ApiEndpoint], idents: &[String], auth: &AuthScheme) -> String {
    let auth_line = match auth_header(auth) {
        Some((header, prefix)) => {
            format!("\"{header}\": `{prefix}${{this.apiKey}}`,\n      ")
        }
        None => String::new(),
    };

    let mut methods = String::new();
    for (endpoint, ident) in endpoints.iter().zip(idents) {
        methods.push_str(&format!(
            "\n  async {ident}() {{\n    \
             return fetch(this.baseUrl + \"{path}\", {{\n      \
             method: \"{method}\",\n      \
             headers: this.getHeaders()\n    \
             }}).then(res => res.json());\n  }}\n",
            path = endpoint.path,
            method = endpoint.method,
        ));
    }

    format!(
        "export class ApiClient {{\n  \
         constructor(private apiKey: string, private baseUrl: string = '') {{}}\n\n  \
         private getHeaders() {{\n    \
         return {{\n      \
         {auth_line}\"Content-Type\": \"application/json\"\n    \
         }};\n  }}\n{methods}}}\n"
    )
}

fn render_python(endpoints: &[ApiEndpoint], idents: &[String], auth: &AuthScheme) -> String {
    let auth_line = match auth_header(auth) {
        Some((header, prefix)) => {
            format!("\"{header}\": f\"{prefix}{{self.api_key}}\",\n            ")
        }
        None => String::new(),
    };

    let mut methods = String::new();
    for (endpoint, ident) in endpoints.iter().zip(idents) {
        methods.push_str(&format!(
            "\n    def {ident}(self):\n        \
             response = requests.{method}(f\"{{self.base_url}}{path}\", headers=self.get_headers())\n        \
             return response.json()\n",
            method = endpoint.method.to_lowercase(),
            path = endpoint.path,
        ));
    }

    format!(
        "import requests\n\n\
         class ApiClient:\n    \
         def __init__(self, api_key: str, base_url: str = ''):\n        \
         self.api_key = api_key\n        \
         self.base_url = base_url\n\n    \
         def get_headers(self):\n        \
         return {{\n            \
         {auth_line}\"Content-Type\": \"application/json\"\n        \
         }}\n{methods}"
    )
}

fn render_go(endpoints: &[ApiEndpoint], idents: &[String], auth: &AuthScheme) -> String {
    let auth_line = match auth_header(auth) {
        Some((header, "Bearer ")) => {
            format!("req.Header.Add(\"{header}\", \"Bearer \"+c.ApiKey)\n    ")
        }
        Some((header, _)) => format!("req.Header.Add(\"{header}\", c.ApiKey)\n    "),
        None => String::new(),
    };

    let mut methods = String::new();
    for (endpoint, ident) in endpoints.iter().zip(idents) {
        methods.push_str(&format!(
            "\nfunc (c *ApiClient) {ident}() (*http.Response, error) {{\n    \
             req, err := http.NewRequest(\"{method}\", c.BaseUrl+\"{path}\", nil)\n    \
             if err != nil {{\n        \
             return nil, err\n    \
             }}\n    \
             c.setHeaders(req)\n    \
             return c.client.Do(req)\n}}\n",
            ident = title_case(ident),
            method = endpoint.method,
            path = endpoint.path,
        ));
    }

    format!(
        "package api\n\n\
         import (\n    \"net/http\"\n)\n\n\
         type ApiClient struct {{\n    \
         ApiKey  string\n    \
         BaseUrl string\n    \
         client  *http.Client\n}}\n\n\
         func NewApiClient(apiKey string, baseUrl string) *ApiClient {{\n    \
         return &ApiClient{{\n        \
         ApiKey:  apiKey,\n        \
         BaseUrl: baseUrl,\n        \
         client:  &http.Client{{}},\n    \
         }}\n}}\n\n\
         func (c *ApiClient) setHeaders(req *http.Request) {{\n    \
         {auth_line}req.Header.Add(\"Content-Type\", \"application/json\")\n}}\n{methods}"
    )
}

// Go methods must be exported to be callable from other packages.
fn title_case(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(method: &str, path: &str) -> ApiEndpoint {
        ApiEndpoint {
            method: method.to_string(),
            path: path.to_string(),
            parameters: vec![],
            description: String::new(),
        }
    }

    #[test]
    fn identifier_strips_separators_and_lowercases_method() {
        let ep = endpoint("GET", "/users/{id}/posts");
        assert_eq!(method_identifier(&ep), "getusersidposts");
    }

    #[test]
    fn identifier_is_deterministic_and_capped() {
        let ep = endpoint("DELETE", "/organizations/{org_id}/billing-accounts/archive");
        let first = method_identifier(&ep);
        let second = method_identifier(&ep);

        assert_eq!(first, second);
        assert!(first.len() <= 30);
        assert!(first.starts_with("delete"));
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn colliding_identifiers_get_numeric_suffixes() {
        // Identical up to the 30-char cap, differing only after it.
        let endpoints = vec![
            endpoint("GET", "/abcdefghijklmnopqrstuvwxyz/ab1"),
            endpoint("GET", "/abcdefghijklmnopqrstuvwxyz/ab2"),
        ];

        let idents = unique_identifiers(&endpoints);
        assert_eq!(idents[0], method_identifier(&endpoints[0]));
        assert_eq!(idents[1], format!("{}2", idents[0]));
    }

    #[test]
    fn api_key_header_is_set_raw_in_every_language() {
        let endpoints = vec![endpoint("GET", "/tickets")];
        let auth = AuthScheme::api_key("x-api-key", Some("header"));
        let bundle = generate_wrappers(&endpoints, &auth);

        assert!(bundle.typescript.contains("\"x-api-key\": `${this.apiKey}`"));
        assert!(bundle.python.contains("\"x-api-key\": f\"{self.api_key}\""));
        assert!(bundle.go.contains("req.Header.Add(\"x-api-key\", c.ApiKey)"));
        assert!(!bundle.typescript.contains("Bearer"));
        assert!(!bundle.python.contains("Bearer"));
        assert!(!bundle.go.contains("Bearer"));
    }

    #[test]
    fn bearer_auth_prefixes_the_key() {
        let endpoints = vec![endpoint("GET", "/tickets")];
        let bundle = generate_wrappers(&endpoints, &AuthScheme::bearer());

        assert!(
            bundle
                .typescript
                .contains("\"Authorization\": `Bearer ${this.apiKey}`")
        );
        assert!(
            bundle
                .python
                .contains("\"Authorization\": f\"Bearer {self.api_key}\"")
        );
        assert!(
            bundle
                .go
                .contains("req.Header.Add(\"Authorization\", \"Bearer \"+c.ApiKey)")
        );
    }

    #[test]
    fn no_auth_emits_no_auth_header_line() {
        let endpoints = vec![endpoint("GET", "/tickets")];
        let bundle = generate_wrappers(&endpoints, &AuthScheme::none());

        assert!(!bundle.typescript.contains("Authorization"));
        assert!(!bundle.python.contains("Authorization"));
        assert!(!bundle.go.contains("Authorization"));
        // the content-type line is unconditional
        assert!(bundle.typescript.contains("\"Content-Type\": \"application/json\""));
        assert!(bundle.python.contains("\"Content-Type\": \"application/json\""));
        assert!(bundle.go.contains("req.Header.Add(\"Content-Type\", \"application/json\")"));
    }

    #[test]
    fn methods_use_the_endpoint_verb_and_path() {
        let endpoints = vec![endpoint("POST", "/tickets"), endpoint("GET", "/tickets")];
        let bundle = generate_wrappers(&endpoints, &AuthScheme::bearer());

        assert!(bundle.typescript.contains("async posttickets()"));
        assert!(bundle.typescript.contains("method: \"POST\""));
        assert!(bundle.python.contains("def gettickets(self):"));
        assert!(bundle.python.contains("requests.post(f\"{self.base_url}/tickets\""));
        assert!(bundle.go.contains("func (c *ApiClient) Posttickets()"));
        assert!(bundle.go.contains("http.NewRequest(\"GET\", c.BaseUrl+\"/tickets\", nil)"));
    }

    #[test]
    fn generation_is_deterministic() {
        let endpoints = vec![endpoint("GET", "/users/{id}"), endpoint("PUT", "/users/{id}")];
        let auth = AuthScheme::api_key("x-api-key", None);

        assert_eq!(
            generate_wrappers(&endpoints, &auth),
            generate_wrappers(&endpoints, &auth)
        );
    }
}
