//! CLI argument parsing
//!
//! Grammar:
//! ```text
//! contract-assistant [options] explain <address | file.sol | source...>
//! contract-assistant [options] generate <description...>
//!
//! OPTIONS:
//!   --config <path>      Config file
//!   --base-url <url>     Backend base URL
//!   --timeout <secs>     Request timeout
//!   --json               Print the outcome as JSON
//!   -v, --verbose        Debug logging
//! ```
//!
//! Text words are joined with single spaces; a lone `-` reads stdin.

use crate::assistant::Mode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "contract-assistant",
    version,
    about = "Explain or generate smart contracts via the contract backend"
)]
pub struct Args {
    /// Config file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the outcome as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Operation to run
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Explain a contract: address, path to a .sol file, or raw source
    Explain {
        #[arg(value_name = "INPUT")]
        input: Vec<String>,
    },
    /// Generate a contract from a natural-language description
    Generate {
        #[arg(value_name = "DESCRIPTION")]
        description: Vec<String>,
    },
}

impl Command {
    pub fn mode(&self) -> Mode {
        match self {
            Command::Explain { .. } => Mode::Explain,
            Command::Generate { .. } => Mode::Generate,
        }
    }

    /// Raw positional words
    pub fn words(&self) -> &[String] {
        match self {
            Command::Explain { input } => input,
            Command::Generate { description } => description,
        }
    }

    /// Whether the text should come from stdin
    pub fn reads_stdin(&self) -> bool {
        matches!(self.words(), [only] if only == "-")
    }

    /// Positional words joined into one string
    pub fn joined_text(&self) -> String {
        self.words().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_explain() {
        let args = parse(&["contract-assistant", "explain", "contract", "Foo", "{}"]);
        assert_eq!(args.command.mode(), Mode::Explain);
        assert_eq!(args.command.joined_text(), "contract Foo {}");
        assert!(!args.json);
    }

    #[test]
    fn test_parse_generate_with_options() {
        let args = parse(&[
            "contract-assistant",
            "--base-url",
            "http://10.0.0.2:8000",
            "generate",
            "ERC-20",
            "token",
            "--json",
            "--timeout",
            "5",
        ]);
        assert_eq!(args.command.mode(), Mode::Generate);
        assert_eq!(args.command.joined_text(), "ERC-20 token");
        assert_eq!(args.base_url.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(args.timeout, Some(5));
        assert!(args.json);
    }

    #[test]
    fn test_stdin_marker() {
        let args = parse(&["contract-assistant", "explain", "-"]);
        assert!(args.command.reads_stdin());

        let args = parse(&["contract-assistant", "explain", "-", "more"]);
        assert!(!args.command.reads_stdin());
    }

    #[test]
    fn test_missing_text_is_allowed() {
        let args = parse(&["contract-assistant", "generate"]);
        assert_eq!(args.command.joined_text(), "");
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Args::try_parse_from(["contract-assistant", "audit", "x"]).is_err());
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        assert!(Args::try_parse_from(["contract-assistant", "--timeout", "soon", "explain", "x"]).is_err());
    }
}
