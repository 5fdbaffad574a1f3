//! Port definitions (interfaces to the outside world)

pub mod inference;
pub mod progress;

pub use inference::{Completion, InferenceClient, InferenceError};
pub use progress::{NoProgress, ProgressNotifier};
