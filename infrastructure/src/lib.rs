//! Infrastructure layer for llm-council
//!
//! Adapters that implement the application-layer ports against the
//! outside world: the OpenRouter inference client and TOML/figment
//! configuration loading.

pub mod config;
pub mod openrouter;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use openrouter::{OPENROUTER_API_URL, OpenRouterClient, RetryPolicy};
