//! Explain-mode input detection
//!
//! The explain backend accepts a deployed contract address, a `.sol` path,
//! or raw source. The client cannot assume the backend shares its
//! filesystem, so local `.sol` files are read here and sent as source.

use std::path::{Path, PathBuf};

/// What an explain input refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// `0x` followed by 40 hex digits
    Address,
    /// Existing local file ending in `.sol`
    SolidityFile(PathBuf),
    /// Anything else, sent verbatim
    RawSource,
}

impl InputKind {
    /// Classify trimmed `input`
    pub fn classify(input: &str) -> Self {
        let trimmed = input.trim();
        if is_address(trimmed) {
            return InputKind::Address;
        }
        if trimmed.ends_with(".sol") && !trimmed.contains('\n') {
            let path = Path::new(trimmed);
            if path.is_file() {
                return InputKind::SolidityFile(path.to_path_buf());
            }
        }
        InputKind::RawSource
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputKind::Address => "address",
            InputKind::SolidityFile(_) => "solidity file",
            InputKind::RawSource => "raw source",
        }
    }
}

fn is_address(text: &str) -> bool {
    text.len() == 42
        && text.starts_with("0x")
        && text[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Text to send for an explain input
///
/// Local `.sol` files are replaced by their contents; everything else is
/// returned unchanged.
pub fn resolve_explain_input(input: &str) -> std::io::Result<String> {
    let kind = InputKind::classify(input);
    tracing::debug!(kind = kind.label(), "classified explain input");
    match kind {
        InputKind::SolidityFile(path) => std::fs::read_to_string(path),
        InputKind::Address | InputKind::RawSource => Ok(input.to_string()),
    }
}
