//! # A2A (Agent2Agent) Protocol Types
//!
//! Serde data structures for the part of the A2A protocol that an agent
//! executor touches while driving a task: the task object and its lifecycle
//! states, messages and their parts, artifacts, the two streaming update
//! events, and the JSON-RPC error object used to report failures.
//!
//! Field names follow the protocol's camelCase wire format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod utils;

pub use utils::{
    new_agent_parts_message, new_agent_text_message, new_artifact, new_task, text_from_message,
};

pub const TASK_KIND: &str = "task";
pub const MESSAGE_KIND: &str = "message";
pub const STATUS_UPDATE_KIND: &str = "status-update";
pub const ARTIFACT_UPDATE_KIND: &str = "artifact-update";

// ============================================================================
// JSON-RPC errors
// ============================================================================

/// A JSON-RPC 2.0 error object, as carried in an error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JSONRPCError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

const INVALID_PARAMS_ERROR_CODE: i32 = -32602;
const INVALID_PARAMS_ERROR_MESSAGE: &str = "Invalid parameters";
const INTERNAL_ERROR_CODE: i32 = -32603;
const INTERNAL_ERROR_MESSAGE: &str = "Internal error";
const TASK_NOT_FOUND_ERROR_CODE: i32 = -32001;
const TASK_NOT_FOUND_ERROR_MESSAGE: &str = "Task not found";
const UNSUPPORTED_OPERATION_ERROR_CODE: i32 = -32004;
const UNSUPPORTED_OPERATION_ERROR_MESSAGE: &str = "This operation is not supported";
const INVALID_AGENT_RESPONSE_ERROR_CODE: i32 = -32006;
const INVALID_AGENT_RESPONSE_ERROR_MESSAGE: &str = "Invalid agent response";

/// Declares an A2A error type with a fixed code and default message.
macro_rules! a2a_error {
    ($(#[$doc:meta])* $name:ident, $code:expr, $message:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
        #[serde(default)]
        pub struct $name {
            pub code: i32,
            pub message: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub data: Option<serde_json::Value>,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    code: $code,
                    message: $message.to_string(),
                    data: None,
                }
            }
        }

        impl From<$name> for JSONRPCError {
            fn from(error: $name) -> Self {
                Self {
                    code: error.code,
                    message: error.message,
                    data: error.data,
                }
            }
        }
    };
}

a2a_error!(
    /// The method parameters are invalid (-32602).
    InvalidParamsError,
    INVALID_PARAMS_ERROR_CODE,
    INVALID_PARAMS_ERROR_MESSAGE
);
a2a_error!(
    /// An internal error on the server (-32603).
    InternalError,
    INTERNAL_ERROR_CODE,
    INTERNAL_ERROR_MESSAGE
);
a2a_error!(
    /// The requested task ID was not found (-32001).
    TaskNotFoundError,
    TASK_NOT_FOUND_ERROR_CODE,
    TASK_NOT_FOUND_ERROR_MESSAGE
);
a2a_error!(
    /// The requested operation is not supported by the agent (-32004).
    UnsupportedOperationError,
    UNSUPPORTED_OPERATION_ERROR_CODE,
    UNSUPPORTED_OPERATION_ERROR_MESSAGE
);
a2a_error!(
    /// The agent produced a response that does not conform to the protocol (-32006).
    InvalidAgentResponseError,
    INVALID_AGENT_RESPONSE_ERROR_CODE,
    INVALID_AGENT_RESPONSE_ERROR_MESSAGE
);

// ============================================================================
// Tasks
// ============================================================================

/// Lifecycle states of a Task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    /// Paused until the client supplies more input.
    InputRequired,
    Completed,
    Canceled,
    Failed,
    Rejected,
    AuthRequired,
    Unknown,
}

/// The status of a task at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    pub state: TaskState,
    /// ISO 8601 timestamp of when this status was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// A stateful unit of work between a client and an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    #[serde(default = "default_task_kind")]
    pub kind: String,
    pub id: String,
    #[serde(rename = "contextId")]
    pub context_id: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub history: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub artifacts: Vec<Artifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

fn default_task_kind() -> String {
    TASK_KIND.to_string()
}

// ============================================================================
// Messages and parts
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
}

/// A single turn exchanged between a client and an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(default = "default_message_kind")]
    pub kind: String,
    #[serde(rename = "messageId")]
    pub message_id: String,
    pub role: MessageRole,
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "contextId")]
    pub context_id: Option<String>,
    /// Omitted on the first message of a new task.
    #[serde(skip_serializing_if = "Option::is_none", rename = "taskId")]
    pub task_id: Option<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        rename = "referenceTaskIds",
        default
    )]
    pub reference_task_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

fn default_message_kind() -> String {
    MESSAGE_KIND.to_string()
}

/// A piece of message or artifact content, discriminated by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, serde_json::Value>>,
    },
    File {
        file: FileContent,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, serde_json::Value>>,
    },
    /// Structured data, e.g. a form schema the client should fill in.
    Data {
        data: serde_json::Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, serde_json::Value>>,
    },
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            metadata: None,
        }
    }

    #[must_use]
    pub fn data(data: serde_json::Value) -> Self {
        Self::Data {
            data,
            metadata: None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Part::Data { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// File content, either inline base64 bytes or a URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FileContent {
    WithBytes {
        bytes: String,
        #[serde(skip_serializing_if = "Option::is_none", rename = "mimeType")]
        mime_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    WithUri {
        uri: String,
        #[serde(skip_serializing_if = "Option::is_none", rename = "mimeType")]
        mime_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

/// An output an agent attaches to a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    #[serde(rename = "artifactId")]
    pub artifact_id: String,
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

// ============================================================================
// Streaming events
// ============================================================================

/// Notifies a client that a task's status changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatusUpdateEvent {
    #[serde(default = "default_status_update_kind")]
    pub kind: String,
    #[serde(rename = "taskId")]
    pub task_id: String,
    #[serde(rename = "contextId")]
    pub context_id: String,
    pub status: TaskStatus,
    /// Set on the last event of the stream for this interaction.
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

fn default_status_update_kind() -> String {
    STATUS_UPDATE_KIND.to_string()
}

/// Notifies a client that an artifact was generated or extended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskArtifactUpdateEvent {
    #[serde(default = "default_artifact_update_kind")]
    pub kind: String,
    #[serde(rename = "taskId")]
    pub task_id: String,
    #[serde(rename = "contextId")]
    pub context_id: String,
    pub artifact: Artifact,
    /// Append these parts to a previously sent artifact with the same ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "lastChunk")]
    pub last_chunk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

fn default_artifact_update_kind() -> String {
    ARTIFACT_UPDATE_KIND.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_state_uses_kebab_case() {
        let encoded = serde_json::to_value(TaskState::InputRequired).expect("serialize");
        assert_eq!(encoded, json!("input-required"));

        let decoded: TaskState = serde_json::from_value(json!("working")).expect("deserialize");
        assert_eq!(decoded, TaskState::Working);
    }

    #[test]
    fn status_update_serializes_final_flag() {
        let event = TaskStatusUpdateEvent {
            kind: STATUS_UPDATE_KIND.to_string(),
            task_id: "task-1".into(),
            context_id: "ctx-1".into(),
            status: TaskStatus {
                state: TaskState::Failed,
                timestamp: None,
                message: None,
            },
            is_final: true,
            metadata: None,
        };

        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(value["final"], json!(true));
        assert_eq!(value["taskId"], json!("task-1"));
        assert_eq!(value["status"]["state"], json!("failed"));
    }

    #[test]
    fn data_part_is_tagged_by_kind() {
        let part = Part::data(json!({ "a": 1 }));
        let value = serde_json::to_value(&part).expect("serialize");
        assert_eq!(value, json!({ "kind": "data", "data": { "a": 1 } }));
        assert_eq!(part.as_data(), Some(&json!({ "a": 1 })));
        assert!(part.as_text().is_none());
    }

    #[test]
    fn unsupported_operation_defaults() {
        let error: JSONRPCError = UnsupportedOperationError::default().into();
        assert_eq!(error.code, -32004);
        assert_eq!(error.message, "This operation is not supported");
    }
}
