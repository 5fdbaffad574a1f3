//! OpenRouter HTTP client
//!
//! One shared `reqwest::Client` (connection pooling) per instance. The
//! retry loop lives here: rate limits and transient server errors back
//! off exponentially, honoring a `Retry-After` hint when the provider
//! sends one; anything else is terminal for the call. By the time an
//! error crosses the port boundary, retries are already exhausted —
//! the orchestrator never blocks on a call that cannot finish.

use crate::openrouter::protocol::{ChatRequest, ChatResponse};
use crate::openrouter::retry::RetryPolicy;
use async_trait::async_trait;
use council_application::{Completion, InferenceClient, InferenceError};
use council_domain::{Message, Model};
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenRouter chat-completions endpoint
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Per-request timeout; council answers can be long
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Inference client backed by the OpenRouter API
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl OpenRouterClient {
    /// Create a client with the default endpoint and retry policy.
    pub fn new(api_key: impl Into<String>) -> Result<Self, InferenceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(InferenceError::MissingCredentials);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| InferenceError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            api_url: OPENROUTER_API_URL.to_string(),
            api_key,
            retry: RetryPolicy::default(),
        })
    }

    /// Override the endpoint (testing, proxies).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Delay before the next attempt: the provider's `Retry-After` hint
    /// when present and parsable, otherwise exponential backoff.
    fn next_delay(&self, response: &reqwest::Response, attempt: u32) -> Duration {
        response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<f64>().ok())
            .map(|secs| self.retry.clamp_retry_after(secs))
            .unwrap_or_else(|| self.retry.backoff_delay(attempt))
    }
}

#[async_trait]
impl InferenceClient for OpenRouterClient {
    async fn query(
        &self,
        model: &Model,
        messages: &[Message],
    ) -> Result<Completion, InferenceError> {
        let request = ChatRequest {
            model: model.as_str(),
            messages,
        };

        let mut last_error = String::new();

        for attempt in 0..self.retry.max_attempts {
            let response = match self
                .http
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) if e.is_timeout() => {
                    warn!(
                        "Timeout querying {} (attempt {}/{})",
                        model,
                        attempt + 1,
                        self.retry.max_attempts
                    );
                    if !self.retry.has_attempts_after(attempt) {
                        return Err(InferenceError::Timeout);
                    }
                    last_error = "timeout".to_string();
                    tokio::time::sleep(self.retry.backoff_delay(attempt)).await;
                    continue;
                }
                Err(e) => return Err(InferenceError::RequestFailed(e.to_string())),
            };

            let status = response.status().as_u16();

            if self.retry.is_retryable(status) {
                let delay = self.next_delay(&response, attempt);
                warn!(
                    "{} returned {}, retrying in {:.1}s (attempt {}/{})",
                    model,
                    status,
                    delay.as_secs_f64(),
                    attempt + 1,
                    self.retry.max_attempts
                );
                last_error = format!("status {}", status);
                if self.retry.has_attempts_after(attempt) {
                    tokio::time::sleep(delay).await;
                    continue;
                }
                break;
            }

            if !response.status().is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(InferenceError::HttpStatus { status, body });
            }

            let parsed: ChatResponse = response
                .json()
                .await
                .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;
            debug!("{} responded (usage id {:?})", model, parsed.id);
            return parsed.into_completion();
        }

        Err(InferenceError::RetriesExhausted(format!(
            "{} after {} attempts: {}",
            model, self.retry.max_attempts, last_error
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            OpenRouterClient::new("  "),
            Err(InferenceError::MissingCredentials)
        ));
    }

    #[test]
    fn test_builder_overrides() {
        let client = OpenRouterClient::new("sk-or-test")
            .unwrap()
            .with_api_url("http://localhost:9999/v1/chat/completions")
            .with_retry(RetryPolicy {
                max_attempts: 1,
                ..Default::default()
            });
        assert_eq!(client.api_url, "http://localhost:9999/v1/chat/completions");
        assert_eq!(client.retry.max_attempts, 1);
    }
}
