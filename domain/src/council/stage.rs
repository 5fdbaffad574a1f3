//! Pipeline stage identifiers

use serde::{Deserialize, Serialize};

/// The three sequential stages of a council run
///
/// Each stage is a full barrier: it completes (every issued call resolved,
/// success or failure) before the next one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stage 1: every member answers the question independently
    Responses,
    /// Stage 2: every member ranks the anonymized answer set
    Rankings,
    /// Stage 3: the lead member synthesizes the final answer
    Synthesis,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Responses => "responses",
            Stage::Rankings => "rankings",
            Stage::Synthesis => "synthesis",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
