//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Run-level validation (roster size, lead membership) carries its own
/// error type in the application layer; this enum covers invariants of
/// the core value objects themselves.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        assert_eq!(DomainError::Cancelled.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::InvalidQuestion("x".to_string()).is_cancelled());
    }
}
