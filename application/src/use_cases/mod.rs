//! Council use cases

pub mod generate_title;
pub mod run_council;

pub use generate_title::{GenerateTitleUseCase, TitleResult, fallback_title};
pub use run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
