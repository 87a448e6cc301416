//! HTTP implementation of [`InferenceClient`] over reqwest.

use async_trait::async_trait;
use prompt::ChatMessage;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use reqwest::Client;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::completion::Completion;
use crate::config::InferenceConfig;
use crate::error::TransportError;
use crate::request::{build_request, InferenceRequest};
use crate::stream::parse_stream;
use crate::{mask_token, InferenceClient};

/// Status and body of one call. `body` is left empty for non-success statuses.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Long-lived client: one connection pool, headers and cookies fixed at construction.
#[derive(Clone)]
pub struct HttpInferenceClient {
    http: Client,
    config: Arc<InferenceConfig>,
}

impl HttpInferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }
        if let Some(cookie) = config.cookie_header() {
            let value = HeaderValue::from_str(&cookie).map_err(|e| TransportError::InvalidHeader {
                name: COOKIE.to_string(),
                reason: e.to_string(),
            })?;
            headers.insert(COOKIE, value);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        let masked_cookie = config
            .cookie_header()
            .map(|c| mask_token(&c))
            .unwrap_or_default();
        info!(
            endpoint = %config.endpoint,
            model_id = %config.model_id,
            timeout_secs = config.timeout.as_secs_f64(),
            header_count = config.headers.len(),
            cookie = %masked_cookie,
            "Inference client ready"
        );

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// POSTs the payload. Transport failures (including the timeout elapsing) are classified;
    /// an HTTP error status is not a transport failure and is returned as-is.
    #[instrument(skip(self, request), fields(request_id = %request.request_id))]
    pub async fn send(&self, request: &InferenceRequest) -> Result<RawResponse, TransportError> {
        info!(
            prompt_len = request.prompt.len(),
            model_id = %request.model_id,
            "Inference request"
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(RawResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.text().await?;
        info!(status = status.as_u16(), body_len = body.len(), "Inference response");
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn complete(&self, history: &[ChatMessage], message: &str) -> Completion {
        let request = build_request(&self.config, history, message);
        match self.send(&request).await {
            Ok(raw) => parse_stream(raw.status, &raw.body),
            Err(e) => {
                error!(error = %e, request_id = %request.request_id, "Inference call failed");
                Completion::Fallback(e.failure_kind())
            }
        }
    }
}
