//! blt-pa11y - pa11y accessibility testing for BLT-style projects
//!
//! This library layers YAML configuration, provisions scaffold files and
//! runs the pa11y CLI once per configured URL.

pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod prompt;
pub mod reports;
pub mod scaffold;
pub mod setup;
pub mod testing;
pub mod wizard;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use config::ResolvedConfig;
