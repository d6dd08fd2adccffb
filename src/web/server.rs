use crate::error::AnalysisError;
use crate::llm::{EnhanceRequest, LlmEnhancer};
use crate::pipeline::AnalysisPipeline;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    use_case: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_reply(err: &AnalysisError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: err.to_string(),
        }),
        status,
    )
}

pub async fn run_server(port: u16) -> Result<()> {
    let pipeline = Arc::new(AnalysisPipeline::new());
    let enhancer = Arc::new(LlmEnhancer::new(std::env::var("GROQ_API_KEY").unwrap_or_else(
        |_| {
            warn!("GROQ_API_KEY not set, /enhance will fail against the live API");
            "gsk_placeholder_key".to_string()
        },
    )));

    let analyze_route = warp::path("analyze")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |request: AnalyzeRequest| {
            let pipeline = pipeline.clone();

            async move {
                let url = request.url.unwrap_or_default();
                let reply = match pipeline.analyze(&url, request.use_case.as_deref()).await {
                    Ok(report) => {
                        warp::reply::with_status(warp::reply::json(&report), StatusCode::OK)
                    }
                    Err(err) => {
                        error!(%err, "analysis failed");
                        error_reply(&err)
                    }
                };

                Ok::<_, warp::Rejection>(reply)
            }
        });

    let enhance_route = warp::path("enhance")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |request: EnhanceRequest| {
            let enhancer = enhancer.clone();

            async move {
                let reply = match enhancer.enhance(&request).await {
                    Ok(enhancement) => {
                        warp::reply::with_status(warp::reply::json(&enhancement), StatusCode::OK)
                    }
                    Err(err) => {
                        error!(%err, "enhancement failed");
                        error_reply(&err)
                    }
                };

                Ok::<_, warp::Rejection>(reply)
            }
        });

    let health_route =
        warp::path("health").map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})));

    let routes = analyze_route
        .or(enhance_route)
        .or(health_route)
        .with(warp::cors().allow_any_origin());

    println!("Server running on http://localhost:{}", port);
    warp::serve(routes).run(([127, 0, 0, 1], port)).await;

    Ok(())
}
