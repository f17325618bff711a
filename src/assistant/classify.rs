//! Failure classification
//!
//! Pure mapping from raw transport evidence to the closed `ErrorKind`
//! taxonomy. No retries happen here.

use crate::assistant::outcome::{ErrorKind, Outcome};
use crate::assistant::transport_types::TransportFailure;
use serde_json::Value as JsonValue;

/// Message for blank input
pub const EMPTY_INPUT_MESSAGE: &str = "no input provided";
/// Message for a 2xx body without any result-carrying key
pub const MISSING_FIELD_MESSAGE: &str = "response missing expected field";
/// Message for a 2xx body that is not JSON
pub const INVALID_JSON_MESSAGE: &str = "response body is not valid JSON";
/// Message for a 2xx JSON body that is not an object
pub const NOT_AN_OBJECT_MESSAGE: &str = "response body is not a JSON object";

/// Convert a transport failure into a `Failure` outcome
pub fn classify(failure: TransportFailure) -> Outcome {
    let outcome = match &failure {
        TransportFailure::Network { cause, .. } => Outcome::failure(
            ErrorKind::NetworkUnavailable,
            format!("backend unreachable: {}", cause.phrase()),
        ),
        TransportFailure::Status {
            status,
            reason,
            body,
        } => Outcome::failure(
            ErrorKind::HttpError(*status),
            http_message(*status, reason.as_deref(), body),
        ),
        TransportFailure::Undecodable { not_an_object, .. } => {
            let message = if *not_an_object {
                NOT_AN_OBJECT_MESSAGE
            } else {
                INVALID_JSON_MESSAGE
            };
            Outcome::failure(ErrorKind::MalformedResponse, message)
        }
    };

    // Raw evidence stays in the logs, never in the outcome
    tracing::debug!(error = %failure, "classified transport failure");
    outcome
}

/// Backend `detail` if present, else the status reason, else `HTTP <code>`
fn http_message(status: u16, reason: Option<&str>, body: &str) -> String {
    if let Some(detail) = extract_detail(body) {
        return detail;
    }
    match reason {
        Some(reason) if !reason.trim().is_empty() => reason.to_string(),
        _ => format!("HTTP {}", status),
    }
}

/// `detail` from an error body such as `{"detail": "model overloaded"}`
///
/// Structured details (validation error lists) are kept as compact JSON.
fn extract_detail(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        JsonValue::Null => None,
        JsonValue::String(s) if s.trim().is_empty() => None,
        JsonValue::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}
