//! Prompt construction for the council stages

pub mod template;

pub use template::PromptTemplate;
