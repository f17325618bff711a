//! contract-assistant: client for a smart-contract explain/generate backend
//!
//! The library owns the request/response contract: which endpoint and
//! payload field each mode uses, how response shapes are normalized, and
//! how failures are classified. Rendering is left to the caller.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod logging;

// Re-export the core surface
pub use assistant::{
    AssistantError, ErrorKind, Lifecycle, Mode, ModeRegistry, Outcome, RequestOrchestrator,
    Session, SessionState,
};

// Re-export transports
pub use assistant::transport::{FakeTransport, ReqwestTransport, Transport};

// Re-export config
pub use config::{AssistantConfig, ConfigError};
