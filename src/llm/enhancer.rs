//! Optional LLM pass over a finished analysis.
//!
//! The model re-ranks endpoints, writes an integration workflow, and
//! annotates the generated wrappers. Its output is untrusted text: anything
//! that does not parse as the expected schema surfaces as
//! [`AnalysisError::UpstreamMalformed`].

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AnalysisError;
use crate::models::{ApiEndpoint, AuthScheme, IntegrationPath, WrapperBundle};

const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const MODEL: &str = "llama-3.3-70b-versatile";

/// Everything the enhancement prompt is built from.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub endpoints: Vec<ApiEndpoint>,
    pub auth: AuthScheme,
    pub integration_path: IntegrationPath,
    pub wrapper_code: WrapperBundle,
    #[serde(default)]
    pub use_case: String,
}

/// The response contract the model must honor.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    pub ranked_endpoints: Vec<ApiEndpoint>,
    pub workflow_steps: Vec<String>,
    pub explanation: String,
    pub enhanced_wrapper_code: WrapperBundle,
}

pub struct LlmEnhancer {
    api_key: String,
    client: reqwest::Client,
}

impl LlmEnhancer {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub async fn enhance(&self, request: &EnhanceRequest) -> Result<Enhancement, AnalysisError> {
        let prompt = build_prompt(request)?;

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": MODEL,
                "messages": [
                    {
                        "role": "system",
                        "content": "You are an expert developer helping a user integrate an API. Respond only with valid JSON."
                    },
                    {
                        "role": "user",
                        "content": prompt
                    }
                ],
                "temperature": 0.2,
                "response_format": { "type": "json_object" },
                "stream": false
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::FetchFailed {
                status: Some(status.as_u16()),
                reason: "LLM enhancement request failed".to_string(),
            });
        }

        let payload: serde_json::Value = response.json().await.map_err(|err| {
            AnalysisError::UpstreamMalformed(format!("LLM response was not JSON: {err}"))
        })?;

        let content = payload
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AnalysisError::UpstreamMalformed("no content returned from LLM".to_string())
            })?;

        parse_enhancement(content)
    }
}

fn build_prompt(request: &EnhanceRequest) -> Result<String, AnalysisError> {
    let encode = |value: serde_json::Result<String>| {
        value.map_err(|err| AnalysisError::Unexpected(format!("prompt assembly failed: {err}")))
    };

    Ok(format!(
        "The user's goal is: {use_case}\n\
         Integration Path Requested: {path}\n\
         Auth Method Detected: {auth}\n\n\
         Endpoints Extracted Deterministically:\n{endpoints}\n\n\
         Raw Wrapper Code Generated:\n{wrappers}\n\n\
         Your task:\n\
         A) Rank the provided endpoints by semantic relevance to the user's use case. Return the full endpoint objects.\n\
         B) Provide a step-by-step workflow (array of strings) for using the endpoints to achieve the use case.\n\
         C) Write a conversational explanation of the integration path and how to handle the auth.\n\
         D) Enhance the wrapper code with inline comments, docstrings, and a small usage example. Do not change its structure.\n\n\
         Respond ONLY with valid JSON matching this exact schema:\n\
         {{\n  \
         \"rankedEndpoints\": [ {{ \"method\": \"...\", \"path\": \"...\", \"description\": \"...\" }} ],\n  \
         \"workflowSteps\": [ \"Step 1: ...\", \"Step 2: ...\" ],\n  \
         \"explanation\": \"...\",\n  \
         \"enhancedWrapperCode\": {{ \"typescript\": \"...\", \"python\": \"...\", \"go\": \"...\" }}\n\
         }}",
        use_case = request.use_case,
        path = match request.integration_path {
            IntegrationPath::Sdk => "SDK",
            IntegrationPath::Rest => "REST",
        },
        auth = encode(serde_json::to_string(&request.auth))?,
        endpoints = encode(serde_json::to_string_pretty(&request.endpoints))?,
        wrappers = encode(serde_json::to_string_pretty(&request.wrapper_code))?,
    ))
}

/// Parse model output against the [`Enhancement`] contract.
fn parse_enhancement(content: &str) -> Result<Enhancement, AnalysisError> {
    serde_json::from_str(content).map_err(|err| {
        AnalysisError::UpstreamMalformed(format!("enhancement payload did not parse: {err}"))
    })
}
