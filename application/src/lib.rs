//! Application layer for llm-council
//!
//! This crate contains the council use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    inference::{Completion, InferenceClient, InferenceError},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::generate_title::{GenerateTitleUseCase, TitleResult, fallback_title};
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
