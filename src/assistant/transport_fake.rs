//! Fake transport for testing
//!
//! Uses scripted replies instead of real HTTP calls, and records every
//! request so tests can assert on call counts and payloads.

use crate::assistant::transport_types::{
    AsyncTransport, NetworkCause, RawResponse, TransportFailure,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted reply for one endpoint
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// Respond with status and body
    Respond { status: u16, body: String },
    /// Fail below HTTP
    Fail { cause: NetworkCause, detail: String },
}

#[derive(Debug, Clone)]
struct Route {
    path: String,
    reply: FakeReply,
    delay: Option<Duration>,
}

/// A request seen by the fake
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub url: String,
    pub body: JsonValue,
}

/// Fake transport for testing (uses scripted replies)
#[derive(Debug)]
pub struct FakeTransport {
    /// Reply used when no route matches
    fallback: Route,
    routes: Vec<Route>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    /// Create fake transport that answers every call with `status` and `body`
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            fallback: Route {
                path: String::new(),
                reply: FakeReply::Respond {
                    status,
                    body: body.to_string(),
                },
                delay: None,
            },
            routes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create fake transport that answers 200 with a JSON value
    pub fn ok_json(body: JsonValue) -> Self {
        Self::new(200, &body.to_string())
    }

    /// Create fake transport that returns a network error
    pub fn with_error(cause: NetworkCause, msg: &str) -> Self {
        let mut fake = Self::new(200, "");
        fake.fallback.reply = FakeReply::Fail {
            cause,
            detail: msg.to_string(),
        };
        fake
    }

    /// Answer requests whose URL ends with `path` with `reply`
    pub fn route(mut self, path: &str, reply: FakeReply) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            reply,
            delay: None,
        });
        self
    }

    /// Answer requests to `path` with `reply` after `delay`
    pub fn route_delayed(mut self, path: &str, reply: FakeReply, delay: Duration) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            reply,
            delay: Some(delay),
        });
        self
    }

    /// Delay every unrouted reply
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.fallback.delay = Some(delay);
        self
    }

    /// Requests seen so far, in arrival order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn route_for(&self, url: &str) -> &Route {
        self.routes
            .iter()
            .find(|r| url.ends_with(&r.path))
            .unwrap_or(&self.fallback)
    }
}

#[async_trait]
impl AsyncTransport for FakeTransport {
    async fn post_json(&self, url: &str, body: &JsonValue) -> Result<RawResponse, TransportFailure> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedCall {
                url: url.to_string(),
                body: body.clone(),
            });

        let route = self.route_for(url).clone();
        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }

        match route.reply {
            FakeReply::Respond { status, body } => Ok(RawResponse::new(status, body)),
            FakeReply::Fail { cause, detail } => Err(TransportFailure::network(cause, detail)),
        }
    }
}
