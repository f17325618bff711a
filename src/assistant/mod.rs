//! Assistant core: dual-mode request orchestration
//!
//! Two backend operations share one client contract:
//! - explain  → describe an existing contract
//! - generate → produce contract source from a description
//!
//! Callers only see `Outcome`. Field-name drift between backend versions
//! is absorbed by the mode registry (outgoing) and the normalizer (incoming).

pub mod classify;
pub mod envelope;
pub mod input;
pub mod mode;
pub mod normalize;
pub mod orchestrator;
pub mod outcome;
pub mod session;
pub mod transport;
pub mod transport_fake;
pub mod transport_reqwest;
pub mod transport_types;

// Re-export common types
pub use classify::classify;
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use input::{resolve_explain_input, InputKind};
pub use mode::{Mode, ModeDescriptor, ModeRegistry};
pub use normalize::normalize;
pub use orchestrator::RequestOrchestrator;
pub use outcome::{ErrorKind, Outcome};
pub use session::{Lifecycle, Session, SessionState, Ticket};
pub use transport::{AsyncTransport, Transport, TransportFailure};

/// Errors raised while setting up the core
///
/// Never produced by `submit`, which reports everything as an `Outcome`.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Payload key {key:?} is not registered for {mode} mode")]
    UnknownPayloadKey { mode: Mode, key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_error_display() {
        let err = AssistantError::UnknownPayloadKey {
            mode: Mode::Explain,
            key: "prompt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Payload key \"prompt\" is not registered for explain mode"
        );
    }
}
