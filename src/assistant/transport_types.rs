//! Transport types
//!
//! Common types shared across transport implementations.

use crate::assistant::envelope::ResponseEnvelope;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Why the backend could not be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkCause {
    /// Connection refused or reset before a response
    Connect,
    /// No response within the transport timeout
    Timeout,
    /// Host name did not resolve
    Dns,
    /// Anything else below HTTP (TLS, malformed URL, body send)
    Other,
}

impl NetworkCause {
    /// Fixed user-facing phrase for this cause
    pub fn phrase(&self) -> &'static str {
        match self {
            NetworkCause::Connect => "connection refused",
            NetworkCause::Timeout => "request timed out",
            NetworkCause::Dns => "host could not be resolved",
            NetworkCause::Other => "request could not be sent",
        }
    }
}

/// Raw failure evidence handed to the classifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    /// No response received
    #[error("Network error ({cause:?}): {detail}")]
    Network { cause: NetworkCause, detail: String },

    /// Response received with a non-success status
    #[error("HTTP error {status}: {body}")]
    Status {
        status: u16,
        reason: Option<String>,
        body: String,
    },

    /// Success status, but the body could not be used as an envelope
    #[error("Undecodable body: {detail}")]
    Undecodable { detail: String, not_an_object: bool },
}

impl TransportFailure {
    pub fn network(cause: NetworkCause, detail: impl Into<String>) -> Self {
        TransportFailure::Network {
            cause,
            detail: detail.into(),
        }
    }
}

/// Response as received from the wire, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Canonical reason phrase, when the transport knows it
    pub reason: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: canonical_reason(status).map(str::to_string),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a success body into an envelope
    ///
    /// Non-success responses become `TransportFailure::Status`; bodies that
    /// are not JSON objects become `TransportFailure::Undecodable`.
    pub fn into_envelope(self) -> Result<ResponseEnvelope, TransportFailure> {
        if !self.is_success() {
            return Err(TransportFailure::Status {
                status: self.status,
                reason: self.reason,
                body: self.body,
            });
        }

        let value: JsonValue =
            serde_json::from_str(&self.body).map_err(|e| TransportFailure::Undecodable {
                detail: e.to_string(),
                not_an_object: false,
            })?;

        match value {
            JsonValue::Object(map) => Ok(map),
            other => Err(TransportFailure::Undecodable {
                detail: format!("expected object, got {}", json_type_name(&other)),
                not_an_object: true,
            }),
        }
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Reason phrase for the status codes this backend produces
pub fn canonical_reason(status: u16) -> Option<&'static str> {
    let reason = match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        413 => "Payload Too Large",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => return None,
    };
    Some(reason)
}

/// Asynchronous HTTP transport
///
/// Abstraction over the HTTP client to enable testing with `FakeTransport`.
/// Implementations return `Ok` for every response received, whatever its
/// status, and `Err` only when no response arrived.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// POST a JSON body and return the raw response
    async fn post_json(&self, url: &str, body: &JsonValue) -> Result<RawResponse, TransportFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_object_decodes() {
        let envelope = RawResponse::new(200, r#"{"output":"ok"}"#)
            .into_envelope()
            .unwrap();
        assert_eq!(envelope["output"], "ok");
    }

    #[test]
    fn test_error_status_becomes_status_failure() {
        let err = RawResponse::new(500, r#"{"detail":"model overloaded"}"#)
            .into_envelope()
            .unwrap_err();
        match err {
            TransportFailure::Status {
                status,
                reason,
                body,
            } => {
                assert_eq!(status, 500);
                assert_eq!(reason.as_deref(), Some("Internal Server Error"));
                assert!(body.contains("model overloaded"));
            }
            other => panic!("unexpected failure: {:?}", other),
        }
    }

    #[test]
    fn test_non_json_body() {
        let err = RawResponse::new(200, "<html>oops</html>")
            .into_envelope()
            .unwrap_err();
        assert!(matches!(
            err,
            TransportFailure::Undecodable {
                not_an_object: false,
                ..
            }
        ));
    }

    #[test]
    fn test_json_array_body_is_not_an_envelope() {
        let err = RawResponse::new(200, "[1,2]").into_envelope().unwrap_err();
        assert!(matches!(
            err,
            TransportFailure::Undecodable {
                not_an_object: true,
                ..
            }
        ));
    }

    #[test]
    fn test_failure_display() {
        let err = TransportFailure::network(NetworkCause::Timeout, "deadline elapsed");
        assert_eq!(format!("{}", err), "Network error (Timeout): deadline elapsed");
    }

    #[test]
    fn test_unknown_status_has_no_reason() {
        assert_eq!(RawResponse::new(599, "").reason, None);
        assert_eq!(canonical_reason(504), Some("Gateway Timeout"));
    }
}
