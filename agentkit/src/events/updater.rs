//! Convenience emitter bound to one task.

use crate::errors::AgentResult;
use crate::events::{EventQueue, TaskEvent};
use crate::status;
use a2a_types::{Message, Part, TaskArtifactUpdateEvent, TaskState};

/// Publishes lifecycle updates for a single task onto an [`EventQueue`].
///
/// Every method awaits the enqueue, so updates leave in call order.
pub struct TaskUpdater<'a> {
    queue: &'a dyn EventQueue,
    task_id: String,
    context_id: String,
}

impl<'a> TaskUpdater<'a> {
    pub fn new(
        queue: &'a dyn EventQueue,
        task_id: impl Into<String>,
        context_id: impl Into<String>,
    ) -> Self {
        Self {
            queue,
            task_id: task_id.into(),
            context_id: context_id.into(),
        }
    }

    /// Emits a status update for the task.
    pub async fn update_status(
        &self,
        state: TaskState,
        message: Option<Message>,
        is_final: bool,
    ) -> AgentResult<()> {
        tracing::debug!(
            task_id = %self.task_id,
            state = ?state,
            is_final,
            "emitting status update"
        );
        let event = status::status_update_event(
            &self.task_id,
            &self.context_id,
            status::status_now(state, message),
            is_final,
        );
        self.queue
            .enqueue_event(TaskEvent::StatusUpdate(event))
            .await
    }

    /// Attaches an artifact to the task in one event, without chunking flags.
    pub async fn add_artifact(&self, parts: Vec<Part>, name: Option<&str>) -> AgentResult<()> {
        let artifact = a2a_types::new_artifact(parts, name);
        tracing::debug!(
            task_id = %self.task_id,
            artifact_id = %artifact.artifact_id,
            name = ?artifact.name,
            "emitting artifact"
        );
        let event = TaskArtifactUpdateEvent {
            kind: a2a_types::ARTIFACT_UPDATE_KIND.to_string(),
            task_id: self.task_id.clone(),
            context_id: self.context_id.clone(),
            artifact,
            append: None,
            last_chunk: None,
            metadata: None,
        };
        self.queue
            .enqueue_event(TaskEvent::ArtifactUpdate(event))
            .await
    }

    /// Marks the task completed. Always final.
    pub async fn complete(&self, message: Option<Message>) -> AgentResult<()> {
        self.update_status(TaskState::Completed, message, true)
            .await
    }

    /// Marks the task failed. Always final.
    pub async fn failed(&self, message: Option<Message>) -> AgentResult<()> {
        self.update_status(TaskState::Failed, message, true).await
    }

    /// Pauses the task until the client supplies more input.
    pub async fn requires_input(&self, message: Option<Message>, is_final: bool) -> AgentResult<()> {
        self.update_status(TaskState::InputRequired, message, is_final)
            .await
    }

    /// Builds an agent message addressed to this task.
    pub fn new_agent_message(&self, parts: Vec<Part>) -> Message {
        a2a_types::new_agent_parts_message(parts, Some(&self.context_id), Some(&self.task_id))
    }

    /// Builds an agent text message addressed to this task.
    pub fn new_text_message(&self, text: impl Into<String>) -> Message {
        a2a_types::new_agent_text_message(text, Some(&self.context_id), Some(&self.task_id))
    }
}
