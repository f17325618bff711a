//! HTTP Transport for the assistant core
//!
//! Re-exports the transport implementations and wraps them in one
//! concrete enum so the orchestrator stays non-generic.

pub use crate::assistant::transport_fake::{FakeReply, FakeTransport, RecordedCall};
pub use crate::assistant::transport_reqwest::ReqwestTransport;
pub use crate::assistant::transport_types::{
    AsyncTransport, NetworkCause, RawResponse, TransportFailure,
};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Concrete transport enum
///
/// Wraps all transport types, avoiding boxed trait objects.
#[derive(Debug)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl AsyncTransport for Transport {
    async fn post_json(&self, url: &str, body: &JsonValue) -> Result<RawResponse, TransportFailure> {
        match self {
            Transport::Real(t) => t.post_json(url, body).await,
            Transport::Fake(t) => t.post_json(url, body).await,
        }
    }
}

impl Transport {
    /// The fake, if this is one (for test assertions)
    pub fn as_fake(&self) -> Option<&FakeTransport> {
        match self {
            Transport::Fake(fake) => Some(fake),
            Transport::Real(_) => None,
        }
    }
}

impl From<ReqwestTransport> for Transport {
    fn from(transport: ReqwestTransport) -> Self {
        Transport::Real(transport)
    }
}

impl From<FakeTransport> for Transport {
    fn from(transport: FakeTransport) -> Self {
        Transport::Fake(transport)
    }
}
