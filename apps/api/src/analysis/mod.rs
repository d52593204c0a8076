//! Analysis webhook client.
//!
//! Resume-vs-job scoring is done by an external n8n workflow. This module
//! posts the extracted resume text and job description to it and normalizes
//! whatever JSON comes back into a single object.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`; [`WebhookAnalyzer`] is the
//! production implementation.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid JSON in webhook response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct AnalysisRequest<'a> {
    pub resume: &'a str,
    #[serde(rename = "job-description")]
    pub job_description: &'a str,
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<Map<String, Value>, AnalysisError>;
}

#[derive(Clone)]
pub struct WebhookAnalyzer {
    client: Client,
    url: String,
}

impl WebhookAnalyzer {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build webhook HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ResumeAnalyzer for WebhookAnalyzer {
    /// Single attempt, no retries. Any non-2xx status is an error.
    async fn analyze(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<Map<String, Value>, AnalysisError> {
        let response = self
            .client
            .post(&self.url)
            .json(&AnalysisRequest {
                resume,
                job_description,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("webhook response status: {}", status);
        debug!("webhook response body: {}", body);

        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = serde_json::from_str(&body)?;
        Ok(normalize_analysis(data))
    }
}

/// Collapses the webhook payload to one object: the first element of a
/// non-empty array, the object itself, or an empty map for anything else.
pub fn normalize_analysis(data: Value) -> Map<String, Value> {
    let candidate = match data {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };

    match candidate {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    /// Serves `app` on an ephemeral local port and returns its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/webhook/analyzer")
    }

    #[test]
    fn test_normalize_takes_first_list_element() {
        let map = normalize_analysis(json!([{"score": 0.9}, {"score": 0.1}]));
        assert_eq!(Value::Object(map), json!({"score": 0.9}));
    }

    #[test]
    fn test_normalize_passes_object_through() {
        let map = normalize_analysis(json!({"score": 72, "missing": ["kubernetes"]}));
        assert_eq!(Value::Object(map), json!({"score": 72, "missing": ["kubernetes"]}));
    }

    #[test]
    fn test_normalize_defaults_to_empty() {
        assert!(normalize_analysis(json!([])).is_empty());
        assert!(normalize_analysis(json!("done")).is_empty());
        assert!(normalize_analysis(json!(null)).is_empty());
        assert!(normalize_analysis(json!([42])).is_empty());
    }

    #[test]
    fn test_request_uses_hyphenated_job_description_key() {
        let body = serde_json::to_value(AnalysisRequest {
            resume: "Hello world",
            job_description: "Engineer",
        })
        .unwrap();
        assert_eq!(body, json!({"resume": "Hello world", "job-description": "Engineer"}));
    }

    #[tokio::test]
    async fn test_analyze_posts_payload_and_normalizes_list() {
        let app = Router::new().route(
            "/webhook/analyzer",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["resume"], "Hello world");
                assert_eq!(body["job-description"], "Engineer");
                Json(json!([{"score": 0.9}]))
            }),
        );
        let url = spawn_upstream(app).await;
        let analyzer = WebhookAnalyzer::new(url, Duration::from_secs(5)).unwrap();

        let map = analyzer.analyze("Hello world", "Engineer").await.unwrap();
        assert_eq!(Value::Object(map), json!({"score": 0.9}));
    }

    #[tokio::test]
    async fn test_analyze_rejects_error_status() {
        let app = Router::new().route(
            "/webhook/analyzer",
            post(|| async { (StatusCode::BAD_GATEWAY, "workflow crashed") }),
        );
        let url = spawn_upstream(app).await;
        let analyzer = WebhookAnalyzer::new(url, Duration::from_secs(5)).unwrap();

        let err = analyzer.analyze("text", "jd").await.unwrap_err();
        match err {
            AnalysisError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "workflow crashed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_json_body() {
        let app = Router::new().route("/webhook/analyzer", post(|| async { "<html>ok</html>" }));
        let url = spawn_upstream(app).await;
        let analyzer = WebhookAnalyzer::new(url, Duration::from_secs(5)).unwrap();

        let err = analyzer.analyze("text", "jd").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
    }

    #[tokio::test]
    async fn test_analyze_times_out() {
        let app = Router::new().route(
            "/webhook/analyzer",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({}))
            }),
        );
        let url = spawn_upstream(app).await;
        let analyzer = WebhookAnalyzer::new(url, Duration::from_millis(200)).unwrap();

        let err = analyzer.analyze("text", "jd").await.unwrap_err();
        match err {
            AnalysisError::Http(e) => assert!(e.is_timeout(), "Error was {e}"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
