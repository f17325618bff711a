//! Operation modes and the mode registry
//!
//! Each mode maps to one endpoint and one set of accepted payload field
//! names. Adding a mode means adding a variant and a descriptor row; nothing
//! else in the crate branches on the observed backend variants.

use serde::Serialize;

/// Operation the caller asks the backend to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Explain an existing contract (address, file, or raw source)
    Explain,
    /// Generate contract source from a natural-language description
    Generate,
}

impl Mode {
    /// All modes, in registry order
    pub const ALL: [Mode; 2] = [Mode::Explain, Mode::Generate];

    /// Lowercase name used in logs and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Explain => "explain",
            Mode::Generate => "generate",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explain" => Ok(Mode::Explain),
            "generate" => Ok(Mode::Generate),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}

/// Static description of one mode
///
/// `payload_keys` lists every field name the backend has accepted for the
/// input text across deployed versions. The first entry is canonical and is
/// the one used for outgoing requests unless configuration selects another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDescriptor {
    pub mode: Mode,
    pub endpoint_path: &'static str,
    pub payload_keys: &'static [&'static str],
}

impl ModeDescriptor {
    /// Field name used for outgoing requests
    pub fn canonical_key(&self) -> &'static str {
        self.payload_keys[0]
    }

    /// Whether `key` is one of the observed field names for this mode
    pub fn accepts(&self, key: &str) -> bool {
        self.payload_keys.contains(&key)
    }

    /// Resolve an optional override to a registered field name
    pub fn resolve_key(&self, requested: Option<&str>) -> Option<&'static str> {
        match requested {
            None => Some(self.canonical_key()),
            Some(key) => self.payload_keys.iter().copied().find(|k| *k == key),
        }
    }
}

const DESCRIPTORS: [ModeDescriptor; 2] = [
    ModeDescriptor {
        mode: Mode::Explain,
        endpoint_path: "/explain",
        payload_keys: &["input", "input_text"],
    },
    ModeDescriptor {
        mode: Mode::Generate,
        endpoint_path: "/generate",
        payload_keys: &["prompt", "spec", "specification"],
    },
];

/// Declarative table of mode descriptors
pub struct ModeRegistry;

impl ModeRegistry {
    /// Look up the descriptor for `mode`
    ///
    /// Total: every `Mode` variant has exactly one row.
    pub fn describe(mode: Mode) -> &'static ModeDescriptor {
        match mode {
            Mode::Explain => &DESCRIPTORS[0],
            Mode::Generate => &DESCRIPTORS[1],
        }
    }

    /// Every registered descriptor
    pub fn all() -> &'static [ModeDescriptor] {
        &DESCRIPTORS
    }
}
