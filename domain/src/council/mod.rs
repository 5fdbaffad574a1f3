//! Council consensus domain
//!
//! Core concepts for the three-stage council pipeline:
//!
//! - [`label`]: anonymization of stage-1 answers ("Response A", ...)
//! - [`parsing`]: extraction of a label ordering from free-text rankings
//! - [`aggregate`]: combination of all judges' orderings into one
//!   average-rank consensus
//! - [`value_objects`]: immutable per-stage result types and the final
//!   [`CouncilBundle`](value_objects::CouncilBundle)
//!
//! Everything here is pure domain logic: no I/O, no async, no sessions.

pub mod aggregate;
pub mod label;
pub mod parsing;
pub mod stage;
pub mod value_objects;

pub use aggregate::calculate_aggregate_rankings;
pub use label::{Label, LabelMap};
pub use parsing::parse_ranking_from_text;
pub use stage::Stage;
pub use value_objects::{
    AggregateEntry, CouncilBundle, JudgeRanking, MemberAnswer, SynthesisResult,
};
