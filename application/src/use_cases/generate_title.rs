//! Conversation title generation (auxiliary task)
//!
//! A single short inference call to the lead model, used to label a new
//! conversation. This task is never on the critical path: the council
//! run spawns it alongside stage 1 and joins it after synthesis, and a
//! failure here must never fail the run — the caller gets a truncated
//! form of the question instead, and the usage id is discarded.

use crate::ports::inference::InferenceClient;
use council_domain::{Message, Model, PromptTemplate, Question};
use std::sync::Arc;
use tracing::warn;

/// Maximum length of the fallback title, in characters
const FALLBACK_MAX_CHARS: usize = 60;

/// Title produced for a conversation
#[derive(Debug, Clone)]
pub struct TitleResult {
    pub title: String,
    /// Present only when the model call succeeded
    pub usage_id: Option<String>,
}

/// Default title when generation fails: the question itself, truncated.
pub fn fallback_title(question: &str) -> String {
    let trimmed = question.trim();
    if trimmed.chars().count() <= FALLBACK_MAX_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(FALLBACK_MAX_CHARS).collect();
    format!("{}...", cut.trim_end())
}

/// Ask `lead` for a short conversation title.
///
/// Infallible by design: any inference failure resolves to the fallback
/// title with no usage id.
pub async fn generate_title<C: InferenceClient>(
    client: &C,
    lead: &Model,
    question: &Question,
) -> TitleResult {
    let messages = vec![
        Message::system(PromptTemplate::title_system()),
        Message::user(PromptTemplate::title_prompt(question.content())),
    ];

    match client.query(lead, &messages).await {
        Ok(completion) => {
            let title = completion.content.trim().trim_matches('"').to_string();
            if title.is_empty() {
                TitleResult {
                    title: fallback_title(question.content()),
                    usage_id: None,
                }
            } else {
                TitleResult {
                    title,
                    usage_id: completion.usage_id,
                }
            }
        }
        Err(e) => {
            warn!("Title generation failed, using fallback: {}", e);
            TitleResult {
                title: fallback_title(question.content()),
                usage_id: None,
            }
        }
    }
}

/// Standalone use case wrapper for callers outside a council run
pub struct GenerateTitleUseCase<C: InferenceClient> {
    client: Arc<C>,
}

impl<C: InferenceClient> GenerateTitleUseCase<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, question: &Question, lead: &Model) -> TitleResult {
        generate_title(self.client.as_ref(), lead, question).await
    }
}
