//! Inference client port
//!
//! Defines the one capability the council consumes from the outside:
//! "query model M with messages, get back content plus an opaque usage
//! id, or a typed failure". Retry policy (backoff, Retry-After, attempt
//! bounds) lives behind this port in the infrastructure adapter; by the
//! time an error surfaces here it is terminal for that call.

use async_trait::async_trait;
use council_domain::{Message, Model};
use thiserror::Error;

/// Errors that can surface from an inference call
///
/// All variants are terminal for the call that produced them. The
/// orchestrator treats any of them as "this member dropped out of this
/// stage" rather than aborting the run.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Missing API credentials")]
    MissingCredentials,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Provider returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Retries exhausted: {0}")]
    RetriesExhausted(String),

    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Successful completion from an inference call
#[derive(Debug, Clone)]
pub struct Completion {
    /// The model's response text
    pub content: String,
    /// Provider-assigned id for out-of-band cost lookup
    pub usage_id: Option<String>,
}

/// Client for LLM inference
///
/// This port defines how the application layer talks to inference
/// providers. Implementations (adapters) live in the infrastructure
/// layer and own connection pooling, authentication, and retries.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send a message list to a model and await its full response.
    async fn query(
        &self,
        model: &Model,
        messages: &[Message],
    ) -> Result<Completion, InferenceError>;
}
