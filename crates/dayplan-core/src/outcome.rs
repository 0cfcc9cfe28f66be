//! Structured results for the tool-calling boundary.
//!
//! Engine failures never cross the boundary as panics or bare errors; the
//! calling layer (HTTP, chat tools, CLI) receives a uniform envelope with
//! a success flag, optional payload, and a machine-readable error kind it
//! can render for the user.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, ValidationError};

/// Machine-readable error classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeError {
    pub kind: String,
    pub message: String,
}

/// Envelope returned to the calling layer for every engine operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OutcomeError>,
}

impl ToolOutcome {
    /// Successful outcome with a serialized payload.
    pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                success: true,
                data: Some(value),
                message: message.into(),
                error: None,
            },
            Err(err) => Self::failure(&CoreError::Json(err)),
        }
    }

    /// Successful outcome with no payload.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: message.into(),
            error: None,
        }
    }

    /// Failed outcome classified from a core error.
    pub fn failure(err: &CoreError) -> Self {
        let message = err.to_string();
        Self {
            success: false,
            data: None,
            message: message.clone(),
            error: Some(OutcomeError {
                kind: error_kind(err).to_string(),
                message,
            }),
        }
    }

    /// Collapse a result into an outcome, with `message` on success.
    pub fn from_result<T: Serialize>(
        result: crate::error::Result<T>,
        message: impl Into<String>,
    ) -> Self {
        match result {
            Ok(data) => Self::ok(data, message),
            Err(err) => Self::failure(&err),
        }
    }
}

fn error_kind(err: &CoreError) -> &'static str {
    match err {
        CoreError::Validation(ValidationError::InvalidTimeRange { .. }) => "invalid_time_range",
        CoreError::Validation(ValidationError::InvalidRecurrenceRule(_)) => {
            "invalid_recurrence_rule"
        }
        CoreError::Validation(ValidationError::InvalidValue { .. }) => "invalid_value",
        CoreError::NotFound { .. } => "not_found",
        CoreError::Store(_) => "store_failure",
        CoreError::Config(_) => "config_failure",
        CoreError::Io(_) | CoreError::Json(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn ok_outcome_carries_payload_and_message() {
        let outcome = ToolOutcome::ok(vec![1, 2, 3], "Found 3 items");
        assert!(outcome.success);
        assert_eq!(outcome.data, Some(serde_json::json!([1, 2, 3])));
        assert_eq!(outcome.message, "Found 3 items");
        assert!(outcome.error.is_none());
    }

    #[test]
    fn validation_failure_maps_to_kind() {
        let now = Utc::now();
        let err = CoreError::Validation(ValidationError::InvalidTimeRange {
            start: now,
            end: now,
        });
        let outcome = ToolOutcome::failure(&err);
        assert!(!outcome.success);
        assert_eq!(outcome.error.unwrap().kind, "invalid_time_range");
    }

    #[test]
    fn not_found_maps_to_kind() {
        let err = CoreError::NotFound {
            id: "missing".to_string(),
        };
        let outcome = ToolOutcome::failure(&err);
        assert_eq!(outcome.error.unwrap().kind, "not_found");
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let outcome = ToolOutcome::message_only("Event deleted");
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(!json.contains("data"));
        assert!(!json.contains("error"));
    }
}
