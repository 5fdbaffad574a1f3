//! Model value object representing an LLM council member

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// Identifiers follow the OpenRouter `provider/model` convention.
/// Any model can join a council; the named variants are the ones
/// offered by default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // OpenAI models
    Gpt51,
    Gpt5,
    Gpt4o,
    // Anthropic models
    ClaudeSonnet45,
    ClaudeOpus41,
    // Google models
    Gemini3Pro,
    Gemini25Pro,
    // xAI models
    Grok4,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the OpenRouter identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt51 => "openai/gpt-5.1",
            Model::Gpt5 => "openai/gpt-5",
            Model::Gpt4o => "openai/gpt-4o",
            Model::ClaudeSonnet45 => "anthropic/claude-sonnet-4.5",
            Model::ClaudeOpus41 => "anthropic/claude-opus-4.1",
            Model::Gemini3Pro => "google/gemini-3-pro-preview",
            Model::Gemini25Pro => "google/gemini-2.5-pro",
            Model::Grok4 => "x-ai/grok-4",
            Model::Custom(s) => s,
        }
    }

    /// Get the default member set for a council run
    pub fn default_members() -> Vec<Model> {
        vec![Model::Gpt51, Model::Gemini3Pro, Model::ClaudeSonnet45]
    }

    /// Get the default lead model (performs stage-3 synthesis)
    pub fn default_lead() -> Model {
        Model::Gemini3Pro
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "openai/gpt-5.1" => Model::Gpt51,
            "openai/gpt-5" => Model::Gpt5,
            "openai/gpt-4o" => Model::Gpt4o,
            "anthropic/claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "anthropic/claude-opus-4.1" => Model::ClaudeOpus41,
            "google/gemini-3-pro-preview" => Model::Gemini3Pro,
            "google/gemini-2.5-pro" => Model::Gemini25Pro,
            "x-ai/grok-4" => Model::Grok4,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("model parsing is infallible"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in Model::default_members() {
            let s = model.to_string();
            let parsed: Model = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "mistralai/mistral-large".parse().unwrap();
        assert_eq!(model, Model::Custom("mistralai/mistral-large".to_string()));
        assert_eq!(model.to_string(), "mistralai/mistral-large");
    }

    #[test]
    fn test_default_lead_is_member() {
        assert!(Model::default_members().contains(&Model::default_lead()));
    }
}
