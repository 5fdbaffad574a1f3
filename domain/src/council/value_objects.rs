//! Council value objects - immutable result types for a pipeline run.
//!
//! These types represent the outputs of each stage:
//! - [`MemberAnswer`] - one member's answer from stage 1
//! - [`JudgeRanking`] - one member's ranking of the anonymized answers
//! - [`AggregateEntry`] - one model's consensus rank across all judges
//! - [`SynthesisResult`] - the lead's final answer from stage 3
//! - [`CouncilBundle`] - everything a run produced, handed to the caller
//!
//! All are created during a single run and never mutated afterwards.

use crate::council::label::{Label, LabelMap};
use crate::council::parsing::parse_ranking_from_text;
use serde::{Deserialize, Serialize};

/// Answer from a single member in stage 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberAnswer {
    /// The model that produced this answer
    pub model: String,
    /// The answer content
    pub content: String,
    /// Provider-assigned usage id for downstream cost lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_id: Option<String>,
}

impl MemberAnswer {
    pub fn new(
        model: impl Into<String>,
        content: impl Into<String>,
        usage_id: Option<String>,
    ) -> Self {
        Self {
            model: model.into(),
            content: content.into(),
            usage_id,
        }
    }
}

/// One judge's ranking of the anonymized answer set (stage 2)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeRanking {
    /// The model that judged
    pub judge: String,
    /// The judge's full free-text response
    pub raw_text: String,
    /// Labels extracted from `raw_text`, best first; empty if unparsable
    pub parsed_order: Vec<Label>,
    /// Provider-assigned usage id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_id: Option<String>,
}

impl JudgeRanking {
    /// Create a ranking, parsing `raw_text` once and caching the result.
    pub fn new(
        judge: impl Into<String>,
        raw_text: impl Into<String>,
        usage_id: Option<String>,
    ) -> Self {
        let raw_text = raw_text.into();
        let parsed_order = parse_ranking_from_text(&raw_text);
        Self {
            judge: judge.into(),
            raw_text,
            parsed_order,
            usage_id,
        }
    }

    /// Whether this judge contributed any ranking signal.
    pub fn has_ranking(&self) -> bool {
        !self.parsed_order.is_empty()
    }
}

/// One model's aggregate position across all judges' rankings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    /// Model id (labels are translated back before callers see this)
    pub model: String,
    /// Mean of the model's 1-indexed positions; lower is better
    pub average_rank: f64,
    /// How many judges ranked this model
    pub rankings_count: usize,
}

/// Final synthesized answer from the lead (stage 3)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResult {
    /// The lead model that synthesized
    pub model: String,
    /// The synthesized answer
    pub content: String,
    /// Provider-assigned usage id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_id: Option<String>,
}

impl SynthesisResult {
    pub fn new(
        model: impl Into<String>,
        content: impl Into<String>,
        usage_id: Option<String>,
    ) -> Self {
        Self {
            model: model.into(),
            content: content.into(),
            usage_id,
        }
    }
}

/// Complete artifact bundle of one council run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilBundle {
    /// The original question
    pub question: String,
    /// Members that were asked (declared order, after deduplication)
    pub members: Vec<String>,
    /// Stage 1: surviving answers in declared member order
    pub stage1: Vec<MemberAnswer>,
    /// Stage 2: rankings from judges that responded
    pub stage2: Vec<JudgeRanking>,
    /// Stage 3: the lead's synthesis
    pub stage3: SynthesisResult,
    /// Consensus ranking, best first
    pub aggregate: Vec<AggregateEntry>,
    /// Label assignment used during stage 2
    pub label_to_model: LabelMap,
    /// Conversation title, when title generation was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Usage ids from every successful call, in stage order
    pub usage_ids: Vec<String>,
}

impl CouncilBundle {
    /// Answers from judges that produced a usable ranking.
    pub fn ranked_judges(&self) -> impl Iterator<Item = &JudgeRanking> {
        self.stage2.iter().filter(|r| r.has_ranking())
    }

    /// The consensus winner, if any judge ranked anything.
    pub fn top_ranked(&self) -> Option<&AggregateEntry> {
        self.aggregate.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_ranking_caches_parse() {
        let ranking = JudgeRanking::new(
            "openai/gpt-5.1",
            "FINAL RANKING:\n1. Response B\n2. Response A",
            Some("gen-123".to_string()),
        );
        assert!(ranking.has_ranking());
        assert_eq!(ranking.parsed_order.len(), 2);
        assert_eq!(ranking.parsed_order[0].as_str(), "Response B");
    }

    #[test]
    fn test_judge_ranking_unparsable_is_empty() {
        let ranking = JudgeRanking::new("m", "no rankings in here", None);
        assert!(!ranking.has_ranking());
        assert!(ranking.parsed_order.is_empty());
    }

    #[test]
    fn test_answer_usage_id_omitted_when_absent() {
        let answer = MemberAnswer::new("m", "text", None);
        let json = serde_json::to_string(&answer).unwrap();
        assert!(!json.contains("usage_id"));
    }
}
