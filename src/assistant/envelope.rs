//! Request and response envelopes
//!
//! Neither type leaves the core: callers only ever see `Outcome`.

use crate::assistant::mode::{Mode, ModeDescriptor};
use serde_json::{Map, Value as JsonValue};

/// Raw decoded backend payload
///
/// Consumed once by the normalizer, then dropped.
pub type ResponseEnvelope = Map<String, JsonValue>;

/// Outgoing request, built fresh for every submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnvelope {
    mode: Mode,
    endpoint_path: &'static str,
    field: &'static str,
    text: String,
}

impl RequestEnvelope {
    /// Build an envelope for `descriptor` carrying `text` under `field`
    ///
    /// `field` must already be resolved against the descriptor, so the body
    /// always holds exactly one registered key.
    pub fn new(descriptor: &ModeDescriptor, field: &'static str, text: impl Into<String>) -> Self {
        debug_assert!(descriptor.accepts(field));
        Self {
            mode: descriptor.mode,
            endpoint_path: descriptor.endpoint_path,
            field,
            text: text.into(),
        }
    }

    /// Build an envelope using the descriptor's canonical field
    pub fn canonical(descriptor: &ModeDescriptor, text: impl Into<String>) -> Self {
        Self::new(descriptor, descriptor.canonical_key(), text)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn endpoint_path(&self) -> &'static str {
        self.endpoint_path
    }

    /// Name of the single body field
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Length of the input text in bytes (for logging)
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// JSON body: `{ <field>: <text> }`
    pub fn body(&self) -> JsonValue {
        let mut body = Map::with_capacity(1);
        body.insert(self.field.to_string(), JsonValue::String(self.text.clone()));
        JsonValue::Object(body)
    }

    /// Full URL against `base_url` (no trailing slash expected)
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.endpoint_path)
    }
}
