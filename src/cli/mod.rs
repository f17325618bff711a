//! CLI module
//!
//! Provides:
//! - Argument parsing (explain / generate)
//! - Config resolution (flag → env → working directory → defaults)
//! - Dispatch of one submission and rendering of its outcome

pub mod args;
pub mod dispatch;

// Re-exports
pub use args::{Args, Command};
pub use dispatch::{exit_code_for, exit_code_for_error, prepare_input, render_outcome, run_cli_mode, ExitCode};

use crate::assistant::AssistantError;
use crate::config::ConfigError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Setup error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
