//! Prompt templates for the three council stages and the title task

use crate::council::label::Label;
use crate::council::parsing::RANKING_MARKER;
use crate::council::value_objects::{AggregateEntry, MemberAnswer};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for stage 1 (independent answers)
    pub fn answer_system() -> &'static str {
        r#"You are a knowledgeable assistant on a council of independent experts.
Answer the user's question directly and thoroughly.
Support your points with reasoning; be concise but complete.
You cannot see the other council members' answers."#
    }

    /// User prompt for stage 1
    pub fn answer_prompt(question: &str) -> String {
        question.to_string()
    }

    /// System prompt for stage 2 (anonymous peer ranking)
    pub fn ranking_system() -> &'static str {
        r#"You are an impartial evaluator comparing anonymous answers to the same question.
Judge only the content: accuracy, completeness, clarity, and usefulness.
The answers are labeled "Response A", "Response B", and so on; you do not
know which model wrote which answer. One of them may be your own."#
    }

    /// User prompt for stage 2: the full anonymized answer set plus the
    /// ranking-section contract the parser relies on.
    pub fn ranking_prompt(question: &str, labeled_answers: &[(Label, String)]) -> String {
        let mut prompt = format!(
            "Original question: {}\n\nHere are the anonymized answers:\n",
            question
        );

        for (label, content) in labeled_answers {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", label, content));
        }

        prompt.push_str(&format!(
            r#"
Evaluate each answer briefly, then rank all of them from best to worst.
End your reply with a section in exactly this format:

{marker}
1. Response X
2. Response Y
...

List every response exactly once."#,
            marker = RANKING_MARKER
        ));

        prompt
    }

    /// System prompt for stage 3 (lead synthesis)
    pub fn synthesis_system() -> &'static str {
        r#"You are the lead of a council of AI models. Several members have
answered the user's question and anonymously ranked each other's answers.
Write the single best final answer for the user: combine the strongest
material, resolve disagreements in favor of better-supported positions,
and keep the result self-contained. Do not mention the council process."#
    }

    /// User prompt for stage 3: de-anonymized answers plus the aggregate
    /// ranking (when any judges produced one).
    pub fn synthesis_prompt(
        question: &str,
        answers: &[MemberAnswer],
        aggregate: &[AggregateEntry],
    ) -> String {
        let mut prompt = format!("Original question: {}\n\nCouncil answers:\n", question);

        for answer in answers {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", answer.model, answer.content));
        }

        if !aggregate.is_empty() {
            prompt.push_str("\nPeer ranking (averaged across anonymous reviews, 1 = best):\n");
            for (i, entry) in aggregate.iter().enumerate() {
                prompt.push_str(&format!(
                    "{}. {} (average rank {:.2} across {} rankings)\n",
                    i + 1,
                    entry.model,
                    entry.average_rank,
                    entry.rankings_count
                ));
            }
        }

        prompt.push_str("\nWrite the final answer to the original question.");
        prompt
    }

    /// System prompt for conversation title generation
    pub fn title_system() -> &'static str {
        r#"Generate a short title (at most 6 words) summarizing the user's question.
Reply with the title only: no quotes, no punctuation at the end."#
    }

    /// User prompt for title generation
    pub fn title_prompt(question: &str) -> String {
        question.to_string()
    }
}
