//! Domain layer for llm-council
//!
//! This crate contains the core council logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council is a three-stage consensus pipeline over several LLMs:
//!
//! - **Stage 1 — Responses**: every member answers the question independently
//! - **Stage 2 — Rankings**: every member ranks the anonymized answer set
//! - **Stage 3 — Synthesis**: the lead member combines answers and rankings
//!   into a final response
//!
//! Answers are anonymized as "Response A", "Response B", ... before stage 2
//! so judges cannot favor a model by name. The free-text rankings are parsed
//! back into label orderings and averaged into a single consensus ranking.

pub mod core;
pub mod council;
pub mod prompt;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    message::{Message, Role},
    model::Model,
    question::Question,
};
pub use council::{
    aggregate::calculate_aggregate_rankings,
    label::{Label, LabelMap},
    parsing::parse_ranking_from_text,
    stage::Stage,
    value_objects::{AggregateEntry, CouncilBundle, JudgeRanking, MemberAnswer, SynthesisResult},
};
pub use prompt::PromptTemplate;
