//! Configuration loading
//!
//! TOML files merged through figment, with built-in defaults lowest and
//! an explicit `--config` path highest.

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, FileCouncilConfig, FileOpenRouterConfig, FileRetryConfig};
pub use loader::ConfigLoader;
