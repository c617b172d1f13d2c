//! Git commit helper library
//!
//! Stages changes, asks Gemini for a commit message describing the staged
//! diff, then commits and pushes the result.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod style;
pub mod templates;
pub mod workflow;

// Re-export commonly used types
pub use config::GaiConfig;
pub use error::{GaiError, Result};
pub use workflow::Outcome;
