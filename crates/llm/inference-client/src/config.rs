//! Endpoint configuration: URL, model selection, timeout and the opaque session headers/cookies.

use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://outerface.venice.ai/api/inference/chat";
pub const DEFAULT_MODEL_ID: &str = "dolphin-3.0-mistral-24b";
pub const DEFAULT_MODEL_NAME: &str = "Venice Uncensored";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub endpoint: String,
    pub model_id: String,
    pub model_name: String,
    pub timeout: Duration,
    /// Extra request headers, sent verbatim. Values are secrets; never log them unmasked.
    pub headers: BTreeMap<String, String>,
    /// Cookies joined into one `Cookie` header. Values are secrets.
    pub cookies: BTreeMap<String, String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
        }
    }
}

impl InferenceConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// `Cookie` header value (`a=1; b=2`), or None when no cookies are configured.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
