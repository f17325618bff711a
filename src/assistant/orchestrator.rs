//! Request orchestration
//!
//! Builds the request for the selected mode, issues exactly one call, and
//! turns whatever comes back into an `Outcome`. Every failure is caught
//! here: `submit` never returns an error and never panics on backend input.

use crate::assistant::classify::{classify, EMPTY_INPUT_MESSAGE, MISSING_FIELD_MESSAGE};
use crate::assistant::envelope::RequestEnvelope;
use crate::assistant::mode::{Mode, ModeRegistry};
use crate::assistant::normalize::normalize;
use crate::assistant::outcome::{ErrorKind, Outcome};
use crate::assistant::session::Session;
use crate::assistant::transport::{AsyncTransport, ReqwestTransport, Transport};
use crate::assistant::AssistantError;
use crate::config::AssistantConfig;
use std::collections::HashMap;
use std::time::Duration;

/// Dispatches explain/generate requests against one backend
#[derive(Debug)]
pub struct RequestOrchestrator {
    transport: Transport,
    base_url: String,
    /// Outgoing field per mode, when not the canonical one
    payload_keys: HashMap<Mode, &'static str>,
}

impl RequestOrchestrator {
    /// Create orchestrator over `transport` targeting `base_url`
    pub fn new(transport: impl Into<Transport>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            transport: transport.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            payload_keys: HashMap::new(),
        }
    }

    /// Create orchestrator with a real transport from validated config
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let transport =
            ReqwestTransport::with_timeout(Duration::from_secs(config.backend.timeout_secs))
                .map_err(|e| AssistantError::Client(e.to_string()))?;

        let mut orchestrator = Self::new(transport, config.backend.base_url.clone());
        for mode in Mode::ALL {
            if let Some(key) = config.mode(mode).payload_key.as_deref() {
                orchestrator = orchestrator.with_payload_key(mode, key)?;
            }
        }
        Ok(orchestrator)
    }

    /// Send `mode` requests under `key` instead of the canonical field
    ///
    /// `key` must be one of the field names registered for `mode`.
    pub fn with_payload_key(mut self, mode: Mode, key: &str) -> Result<Self, AssistantError> {
        let resolved = ModeRegistry::describe(mode)
            .resolve_key(Some(key))
            .ok_or_else(|| AssistantError::UnknownPayloadKey {
                mode,
                key: key.to_string(),
            })?;
        self.payload_keys.insert(mode, resolved);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Build the envelope for one submission
    pub fn build_request(&self, mode: Mode, input: &str) -> RequestEnvelope {
        let descriptor = ModeRegistry::describe(mode);
        match self.payload_keys.get(&mode) {
            Some(key) => RequestEnvelope::new(descriptor, *key, input),
            None => RequestEnvelope::canonical(descriptor, input),
        }
    }

    /// Submit `raw_input` in `mode` and wait for the outcome
    ///
    /// Blank input short-circuits to `EmptyInput` with no network call.
    /// Otherwise exactly one request is sent. The session is settled with
    /// the outcome unless a newer submission started in the meantime; the
    /// outcome is returned to this caller either way.
    pub async fn submit(&self, session: &Session, mode: Mode, raw_input: &str) -> Outcome {
        let ticket = session.begin(mode);

        if raw_input.trim().is_empty() {
            let outcome = Outcome::failure(ErrorKind::EmptyInput, EMPTY_INPUT_MESSAGE);
            session.settle(&ticket, &outcome);
            return outcome;
        }

        let envelope = self.build_request(mode, raw_input);
        let url = envelope.url(&self.base_url);

        session.mark_pending(&ticket);
        tracing::info!(
            mode = %mode,
            url = %url,
            field = envelope.field(),
            input_len = envelope.text_len(),
            "dispatching request"
        );

        let outcome = match self.transport.post_json(&url, &envelope.body()).await {
            Ok(response) => match response.into_envelope() {
                Ok(body) => match normalize(mode, &body) {
                    Some(text) => Outcome::success(text),
                    None => Outcome::failure(ErrorKind::MalformedResponse, MISSING_FIELD_MESSAGE),
                },
                Err(failure) => classify(failure),
            },
            Err(failure) => classify(failure),
        };

        match &outcome {
            Outcome::Success { text } => {
                tracing::info!(mode = %mode, result_len = text.len(), "request succeeded")
            }
            Outcome::Failure { kind, message } => {
                tracing::warn!(mode = %mode, kind = %kind, message = %message, "request failed")
            }
        }

        if !session.settle(&ticket, &outcome) {
            tracing::debug!(
                mode = %mode,
                generation = ticket.generation(),
                "outcome not recorded: submission was superseded"
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::session::Lifecycle;
    use crate::assistant::transport::{FakeTransport, NetworkCause};
    use serde_json::json;

    fn orchestrator(fake: FakeTransport) -> RequestOrchestrator {
        RequestOrchestrator::new(fake, "http://backend.test/")
    }

    fn fake_calls(orchestrator: &RequestOrchestrator) -> usize {
        orchestrator.transport().as_fake().unwrap().call_count()
    }

    #[tokio::test]
    async fn test_blank_input_makes_no_call() {
        let orch = orchestrator(FakeTransport::ok_json(json!({"output": "x"})));
        let session = Session::default();

        for input in ["", "   ", "\n\t "] {
            let outcome = orch.submit(&session, Mode::Explain, input).await;
            assert_eq!(
                outcome,
                Outcome::failure(ErrorKind::EmptyInput, "no input provided")
            );
            assert_eq!(session.lifecycle(), Lifecycle::Settled);
        }
        assert_eq!(fake_calls(&orch), 0);
    }

    #[tokio::test]
    async fn test_request_uses_canonical_field_and_endpoint() {
        let orch = orchestrator(FakeTransport::ok_json(json!({"output": "x"})));
        let session = Session::default();

        orch.submit(&session, Mode::Generate, "ERC-20 token").await;

        let calls = orch.transport().as_fake().unwrap().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "http://backend.test/generate");
        assert_eq!(calls[0].body, json!({"prompt": "ERC-20 token"}));
    }

    #[tokio::test]
    async fn test_payload_key_override() {
        let orch = orchestrator(FakeTransport::ok_json(json!({"output": "x"})))
            .with_payload_key(Mode::Explain, "input_text")
            .unwrap();
        let session = Session::default();

        orch.submit(&session, Mode::Explain, "contract Foo {}").await;

        let calls = orch.transport().as_fake().unwrap().calls();
        assert_eq!(calls[0].body, json!({"input_text": "contract Foo {}"}));
    }

    #[test]
    fn test_unknown_payload_key_rejected() {
        let result = orchestrator(FakeTransport::new(200, "{}"))
            .with_payload_key(Mode::Generate, "input");
        assert!(matches!(
            result,
            Err(AssistantError::UnknownPayloadKey {
                mode: Mode::Generate,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_success_settles_session() {
        let orch = orchestrator(FakeTransport::ok_json(
            json!({"output": "This contract does nothing."}),
        ));
        let session = Session::default();

        let outcome = orch.submit(&session, Mode::Explain, "contract Foo {}").await;
        assert_eq!(outcome, Outcome::success("This contract does nothing."));
        assert_eq!(session.lifecycle(), Lifecycle::Settled);
        assert_eq!(session.last_outcome(), Some(outcome));
    }

    #[tokio::test]
    async fn test_missing_field_is_malformed() {
        let orch = orchestrator(FakeTransport::ok_json(json!({"unexpected": "shape"})));
        let session = Session::default();

        let outcome = orch.submit(&session, Mode::Explain, "contract Foo {}").await;
        assert_eq!(
            outcome,
            Outcome::failure(ErrorKind::MalformedResponse, "response missing expected field")
        );
        assert_eq!(fake_calls(&orch), 1);
    }

    #[tokio::test]
    async fn test_network_failure_settles_session() {
        let orch = orchestrator(FakeTransport::with_error(NetworkCause::Timeout, "elapsed"));
        let session = Session::default();

        let outcome = orch.submit(&session, Mode::Generate, "ERC-20 token").await;
        assert_eq!(outcome.error_kind(), Some(ErrorKind::NetworkUnavailable));
        assert_eq!(session.lifecycle(), Lifecycle::Settled);
    }
}
