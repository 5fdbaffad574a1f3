//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the config file and
//! are deserialized directly. Conversions to domain/runtime types live
//! on the structs themselves.

use crate::openrouter::client::OPENROUTER_API_URL;
use crate::openrouter::retry::RetryPolicy;
use council_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub council: FileCouncilConfig,
    pub openrouter: FileOpenRouterConfig,
}

/// `[council]` section: who sits on the council
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Member model ids; empty means the built-in default set
    pub members: Vec<String>,
    /// Lead model for synthesis; unset means the built-in default
    pub lead: Option<String>,
}

/// `[openrouter]` section: endpoint, credentials, retry tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenRouterConfig {
    pub api_url: String,
    /// Usually left unset in files; the environment supplies it
    pub api_key: Option<String>,
    pub retry: FileRetryConfig,
}

impl Default for FileOpenRouterConfig {
    fn default() -> Self {
        Self {
            api_url: OPENROUTER_API_URL.to_string(),
            api_key: None,
            retry: FileRetryConfig::default(),
        }
    }
}

/// `[openrouter.retry]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            base_delay_ms: policy.base_delay.as_millis() as u64,
            max_delay_ms: policy.max_delay.as_millis() as u64,
        }
    }
}

impl FileRetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            ..Default::default()
        }
    }
}

impl FileConfig {
    /// Council members, falling back to the built-in default set.
    pub fn members(&self) -> Vec<Model> {
        if self.council.members.is_empty() {
            return Model::default_members();
        }
        self.council
            .members
            .iter()
            .map(|s| s.parse().expect("model parsing is infallible"))
            .collect()
    }

    /// Lead model, falling back to the built-in default.
    pub fn lead(&self) -> Model {
        match &self.council.lead {
            Some(lead) => lead.parse().expect("model parsing is infallible"),
            None => Model::default_lead(),
        }
    }

    /// API key from config, or the environment as fallback.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.openrouter
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
