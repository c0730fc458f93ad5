//! Drip CLI Library
//!
//! Command-line planning of a batch's drip schedule stored in a JSON
//! snapshot: preview, course import, group reordering and re-sequencing.
//!
//! This library exposes the commands and configuration for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

// Re-export commonly used types for convenience
pub use config::{DripConfig, LoggingSettings};
pub use error::{CliError, Result};
