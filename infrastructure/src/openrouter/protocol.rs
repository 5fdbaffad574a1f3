//! OpenRouter chat-completions wire types
//!
//! Only the fields the council consumes are modeled; everything else in
//! the provider envelope is ignored during deserialization. The response
//! `id` doubles as the usage id for out-of-band cost lookup.

use council_application::{Completion, InferenceError};
use council_domain::Message;
use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Generation id, usable against the provider's usage endpoint
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Extract the first choice's content, or a typed error when the
    /// envelope has no usable message.
    pub fn into_completion(self) -> Result<Completion, InferenceError> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                InferenceError::InvalidResponse("response contained no message content".to_string())
            })?;

        Ok(Completion {
            content,
            usage_id: self.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::Role;

    #[test]
    fn test_request_serializes_messages() {
        let messages = vec![Message::system("sys"), Message::user("hi")];
        let request = ChatRequest {
            model: "openai/gpt-5.1",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "openai/gpt-5.1");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_response_parses_envelope() {
        let raw = r#"{
            "id": "gen-abc123",
            "model": "openai/gpt-5.1",
            "choices": [
                {"message": {"role": "assistant", "content": "Hello there."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let completion = parsed.into_completion().unwrap();
        assert_eq!(completion.content, "Hello there.");
        assert_eq!(completion.usage_id.as_deref(), Some("gen-abc123"));
    }

    #[test]
    fn test_empty_choices_is_invalid() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"id": "gen-1", "choices": []}"#).unwrap();
        assert!(matches!(
            parsed.into_completion(),
            Err(InferenceError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_null_content_is_invalid() {
        let raw = r#"{"id": "gen-1", "choices": [{"message": {"content": null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.into_completion().is_err());
    }

    #[test]
    fn test_message_roundtrip_through_request() {
        let messages = vec![Message {
            role: Role::Assistant,
            content: "prior turn".to_string(),
        }];
        let request = ChatRequest {
            model: "m",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "assistant");
    }
}
