//! Core value objects shared across the council pipeline

pub mod error;
pub mod message;
pub mod model;
pub mod question;

pub use error::DomainError;
pub use message::{Message, Role};
pub use model::Model;
pub use question::Question;
