//! Constructors for the protocol objects an agent executor emits.

use crate::{
    Artifact, Message, MessageRole, Part, Task, TaskState, TaskStatus, MESSAGE_KIND, TASK_KIND,
};
use uuid::Uuid;

/// Creates a new task for the given inbound message.
///
/// The message's `taskId` and `contextId` are reused when the client supplied
/// them; missing identifiers are generated. The task starts in `submitted`
/// with the message as its first history entry.
#[must_use]
pub fn new_task(message: &Message) -> Task {
    let id = message
        .task_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let context_id = message
        .context_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Task {
        kind: TASK_KIND.to_string(),
        id,
        context_id,
        status: TaskStatus {
            state: TaskState::Submitted,
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
            message: None,
        },
        history: vec![message.clone()],
        artifacts: Vec::new(),
        metadata: None,
    }
}

/// Builds an agent message holding a single text part.
#[must_use]
pub fn new_agent_text_message(
    text: impl Into<String>,
    context_id: Option<&str>,
    task_id: Option<&str>,
) -> Message {
    new_agent_parts_message(vec![Part::text(text)], context_id, task_id)
}

/// Builds an agent message from the given parts.
#[must_use]
pub fn new_agent_parts_message(
    parts: Vec<Part>,
    context_id: Option<&str>,
    task_id: Option<&str>,
) -> Message {
    Message {
        kind: MESSAGE_KIND.to_string(),
        message_id: Uuid::new_v4().to_string(),
        role: MessageRole::Agent,
        parts,
        context_id: context_id.map(str::to_string),
        task_id: task_id.map(str::to_string),
        reference_task_ids: Vec::new(),
        metadata: None,
    }
}

/// Builds an artifact with a fresh identifier.
#[must_use]
pub fn new_artifact(parts: Vec<Part>, name: Option<&str>) -> Artifact {
    Artifact {
        artifact_id: Uuid::new_v4().to_string(),
        parts,
        name: name.map(str::to_string),
        description: None,
        metadata: None,
    }
}

/// Concatenates the text parts of a message, one per line.
///
/// Non-text parts are skipped.
#[must_use]
pub fn text_from_message(message: &Message) -> String {
    message
        .parts
        .iter()
        .filter_map(Part::as_text)
        .collect::<Vec<_>>()
        .join("\n")
}
