//! OpenRouter inference adapter
//!
//! Implements the [`InferenceClient`](council_application::InferenceClient)
//! port against the OpenRouter chat-completions API, with bounded
//! exponential-backoff retries for rate limits and server errors.

pub mod client;
pub mod protocol;
pub mod retry;

pub use client::{OPENROUTER_API_URL, OpenRouterClient};
pub use retry::RetryPolicy;
