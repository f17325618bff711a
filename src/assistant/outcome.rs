//! Outcome model exposed past the core boundary

use serde::Serialize;

/// Closed failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "status", rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport never reached the backend (refused, timeout, DNS)
    NetworkUnavailable,
    /// Backend reached and rejected the request
    HttpError(u16),
    /// 2xx with a body the client cannot use
    MalformedResponse,
    /// Blank input, rejected locally
    EmptyInput,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NetworkUnavailable => write!(f, "network unavailable"),
            ErrorKind::HttpError(status) => write!(f, "HTTP error {}", status),
            ErrorKind::MalformedResponse => write!(f, "malformed response"),
            ErrorKind::EmptyInput => write!(f, "empty input"),
        }
    }
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success { text: String },
    Failure { kind: ErrorKind, message: String },
}

impl Outcome {
    pub fn success(text: impl Into<String>) -> Self {
        Outcome::Success { text: text.into() }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Outcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Failure kind, if this is a failure
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Success text or failure message
    pub fn text(&self) -> &str {
        match self {
            Outcome::Success { text } => text,
            Outcome::Failure { message, .. } => message,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success { text } => f.write_str(text),
            Outcome::Failure { kind, message } => write!(f, "Error ({}): {}", kind, message),
        }
    }
}
