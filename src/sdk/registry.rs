//! Package-registry lookup for an official SDK.
//!
//! Best effort: one bounded request per registry, npm first, then PyPI.
//! A miss just means the integration falls back to raw REST.

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::AnalysisError;
use crate::models::SdkInfo;

const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";
const PYPI_REGISTRY_URL: &str = "https://pypi.org/pypi";

pub struct SdkDetector {
    client: reqwest::Client,
    npm_url: String,
    pypi_url: String,
}

impl SdkDetector {
    pub fn new() -> Self {
        Self::with_registries(NPM_REGISTRY_URL, PYPI_REGISTRY_URL)
    }

    fn with_registries(npm_url: &str, pypi_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap(),
            npm_url: npm_url.to_string(),
            pypi_url: pypi_url.to_string(),
        }
    }

    /// The primary domain label of a documentation URL, used as the
    /// candidate package name ("https://www.stripe.com/docs" -> "stripe").
    pub fn api_name_from_url(url: &str) -> Option<String> {
        let pattern = Regex::new(r"^https?://(?:www\.)?([^.]+)\.").unwrap();
        pattern
            .captures(url)
            .map(|captures| captures[1].to_string())
    }

    /// Look `api_name` up on npm, then PyPI; first hit wins.
    ///
    /// Transport failures and non-200s count as misses. A 200 whose body
    /// does not carry the registry's expected shape is a violated payload
    /// contract and surfaces as [`AnalysisError::UpstreamMalformed`].
    pub async fn detect(&self, api_name: &str) -> Result<SdkInfo, AnalysisError> {
        let npm_url = format!("{}/{}", self.npm_url, api_name);
        if let Some(body) = self.fetch_registry(&npm_url).await? {
            if let Some(name) = body.get("name").and_then(|v| v.as_str()) {
                return Ok(SdkInfo {
                    available: true,
                    recommended: Some(name.to_string()),
                });
            }
        }

        let pypi_url = format!("{}/{}/json", self.pypi_url, api_name);
        if let Some(body) = self.fetch_registry(&pypi_url).await? {
            if let Some(name) = body.pointer("/info/name").and_then(|v| v.as_str()) {
                return Ok(SdkInfo {
                    available: true,
                    recommended: Some(name.to_string()),
                });
            }
        }

        Ok(SdkInfo::default())
    }

    /// One GET against a registry. `None` means the package is not there
    /// (or the registry is unreachable).
    async fn fetch_registry(&self, url: &str) -> Result<Option<Value>, AnalysisError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(url, error = %err, "registry lookup failed");
                return Ok(None);
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }

        let body = response.json::<Value>().await.map_err(|err| {
            AnalysisError::UpstreamMalformed(format!("registry response was not JSON: {err}"))
        })?;

        Ok(Some(body))
    }
}

impl Default for SdkDetector {
    fn default() -> Self {
        Self::new()
    }
}
