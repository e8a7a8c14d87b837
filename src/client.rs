//! # Copy Generation Client
//!
//! Posts the form payload to the copy-generation webhook and returns the
//! response body as JSON.
//!
//! The webhook does not always answer with a JSON document. When the body
//! does not parse, the raw text is kept as a [`Value::String`] so field
//! extraction can still try it (and will usually come up empty).
//!
//! Failures are classified into the four kinds of [`GenerateError`], each
//! with its own user-facing message.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

use crate::form::GenerateRequest;

/// Default webhook endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://hook.eu2.make.com/wo7ggj9ex4ppxnv3l24m8jtlw0syd7a1";

/// Default upper bound on one request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 250;

/// Why a generation request failed.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The endpoint could not be reached
    #[error("connection failed: {0}")]
    Connect(String),
    /// No response within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The endpoint answered with a non-2xx status
    #[error("server returned {status}")]
    Status { status: StatusCode, detail: String },
    /// Anything else
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl GenerateError {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            GenerateError::Connect(_) => {
                "AI 서비스에 연결할 수 없습니다. Make 시나리오가 실행 중인지 확인해주세요."
                    .to_string()
            }
            GenerateError::Timeout(_) => {
                "요청이 시간 초과되었습니다. Make 처리 시간을 확인해주세요.".to_string()
            }
            GenerateError::Status { status, detail } => {
                if detail.is_empty() {
                    format!("서버 오류: {}", status)
                } else {
                    format!("서버 오류: {} ({})", status, detail)
                }
            }
            GenerateError::Unexpected(detail) => {
                format!("예상치 못한 오류가 발생했습니다: {}", detail)
            }
        }
    }
}

/// Something that can turn a form payload into a webhook response.
#[async_trait]
pub trait CopyGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<Value, GenerateError>;
}

/// HTTP client for the copy-generation webhook.
#[derive(Debug, Clone)]
pub struct CopyClient {
    endpoint: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl CopyClient {
    /// Create a client for `endpoint` with a per-request `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerateError::Unexpected(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            endpoint: endpoint.into(),
            timeout,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: &reqwest::Error) -> GenerateError {
        // Connect timeouts report as both; the connection failure wins.
        if err.is_connect() {
            GenerateError::Connect(err.to_string())
        } else if err.is_timeout() {
            GenerateError::Timeout(self.timeout)
        } else {
            GenerateError::Unexpected(err.to_string())
        }
    }
}

#[async_trait]
impl CopyGenerator for CopyClient {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, event_status = %request.event_status))]
    async fn generate(&self, request: &GenerateRequest) -> Result<Value, GenerateError> {
        tracing::info!(movie_title = %request.movie_title, "Requesting banner copy");

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                self.classify(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .map(|body| truncate_detail(body.trim()))
                .unwrap_or_default();
            tracing::error!(%status, %detail, "Webhook returned error status");
            return Err(GenerateError::Status { status, detail });
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            self.classify(&e)
        })?;

        let value = match serde_json::from_str::<Value>(&body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Response is not JSON, keeping raw text: {}", e);
                Value::String(body)
            }
        };

        tracing::debug!("Webhook request successful");
        Ok(value)
    }
}

/// Keep error bodies short enough for a status line.
fn truncate_detail(body: &str) -> String {
    const MAX_DETAIL_CHARS: usize = 200;
    if body.chars().count() <= MAX_DETAIL_CHARS {
        return body.to_string();
    }
    let mut detail: String = body.chars().take(MAX_DETAIL_CHARS).collect();
    detail.push('…');
    detail
}
