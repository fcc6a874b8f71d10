use a2a_types::{
    InternalError, InvalidAgentResponseError, InvalidParamsError, JSONRPCError, TaskNotFoundError,
    UnsupportedOperationError,
};
use serde_json::json;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for agentkit
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    // === Request Errors ===
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    // === Agent Output Errors ===
    #[error("Malformed form payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Malformed progress item: {reason}")]
    MalformedItem { reason: String },

    #[error("Agent stream error: {source}")]
    AgentStream {
        #[source]
        source: BoxError,
    },

    // === Delivery Errors ===
    #[error("Event queue closed for task {task_id}")]
    EventQueueClosed { task_id: String },

    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    // === Configuration Errors ===
    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Serialization error: {format}: {reason}")]
    Serialization { format: String, reason: String },
}

/// Convenience type alias
pub type AgentResult<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Wraps an arbitrary error raised by an agent implementation.
    pub fn agent_stream(source: impl Into<BoxError>) -> Self {
        Self::AgentStream {
            source: source.into(),
        }
    }

    /// Whether a fresh invocation with the same request could succeed.
    ///
    /// Invocations that end this way leave the task in progress; callers
    /// should treat them as "try again" rather than as a verdict on the task.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AgentStream { .. } => true,
            Self::EventQueueClosed { .. } => true,

            Self::UnsupportedOperation { .. } => false,
            Self::MalformedPayload { .. } => false,
            Self::MalformedItem { .. } => false,
            Self::TaskNotFound { .. } => false,
            Self::InvalidConfiguration { .. } => false,
            Self::Serialization { .. } => false,
        }
    }

    /// Get error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation { .. } => "request",

            Self::MalformedPayload { .. }
            | Self::MalformedItem { .. }
            | Self::AgentStream { .. } => "agent",

            Self::EventQueueClosed { .. } | Self::TaskNotFound { .. } => "task",

            Self::InvalidConfiguration { .. } => "config",

            Self::Serialization { .. } => "io",
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            format: "json".to_string(),
            reason: error.to_string(),
        }
    }
}

/// Map an [`AgentError`] into an A2A-compliant [`JSONRPCError`].
///
/// Keeps protocol wiring out of the executor so that the surrounding server
/// can report failures without knowing the translator's internals.
#[must_use]
pub fn to_jsonrpc_error(error: &AgentError) -> JSONRPCError {
    match error {
        AgentError::UnsupportedOperation { operation } => UnsupportedOperationError {
            data: Some(json!({ "operation": operation })),
            ..Default::default()
        }
        .into(),
        AgentError::TaskNotFound { task_id } => TaskNotFoundError {
            message: format!("Task not found: {task_id}"),
            data: Some(json!({ "taskId": task_id })),
            ..Default::default()
        }
        .into(),
        AgentError::MalformedPayload { reason } | AgentError::MalformedItem { reason } => {
            InvalidAgentResponseError {
                data: Some(json!({ "details": reason })),
                ..Default::default()
            }
            .into()
        }
        AgentError::InvalidConfiguration { field, reason } => InvalidParamsError {
            message: format!("Invalid configuration for {field}: {reason}"),
            data: Some(json!({ "field": field, "reason": reason })),
            ..Default::default()
        }
        .into(),
        other => InternalError {
            data: Some(json!({ "details": other.to_string() })),
            ..Default::default()
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_to_string_contains_context() {
        let err = AgentError::InvalidConfiguration {
            field: "artifact_name".into(),
            reason: "must not be empty".into(),
        };
        let message = err.to_string();
        assert!(message.contains("artifact_name"));
        assert!(message.contains("must not be empty"));
    }

    #[test]
    fn unsupported_operation_maps_to_a2a_code() {
        let err = to_jsonrpc_error(&AgentError::UnsupportedOperation {
            operation: "tasks/cancel".into(),
        });
        assert_eq!(err.code, UnsupportedOperationError::default().code);
        assert_eq!(err.data, Some(json!({ "operation": "tasks/cancel" })));
    }

    #[test]
    fn malformed_payload_maps_to_invalid_agent_response() {
        let err = to_jsonrpc_error(&AgentError::MalformedPayload {
            reason: "expected value at line 1".into(),
        });
        assert_eq!(err.code, InvalidAgentResponseError::default().code);
    }

    #[test]
    fn stream_errors_map_to_internal() {
        let err = AgentError::agent_stream(std::io::Error::other("pipe closed"));
        assert!(err.is_recoverable());
        assert_eq!(err.category(), "agent");

        let rpc = to_jsonrpc_error(&err);
        assert_eq!(rpc.code, InternalError::default().code);
        assert!(rpc.data.expect("details").to_string().contains("pipe closed"));
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AgentError = parse_err.into();
        assert!(matches!(err, AgentError::Serialization { ref format, .. } if format == "json"));
        assert!(!err.is_recoverable());
    }
}
