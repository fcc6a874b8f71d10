//! Delivery of task events.
//!
//! Everything the executor produces leaves through an [`EventQueue`]: the
//! task-creation announcement, status updates, and artifact updates. Queues
//! are ordered; the executor awaits every enqueue before pulling the next
//! agent item.

pub mod event_bus;
pub mod updater;

pub use event_bus::{TaskEventBus, TaskEventReceiver};
pub use updater::TaskUpdater;

use crate::errors::{AgentError, AgentResult};
use a2a_types::{Message, Task, TaskArtifactUpdateEvent, TaskStatusUpdateEvent};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A significant event in a task's lifecycle.
///
/// Serializes untagged, i.e. as the bare A2A object, which is the shape of a
/// `message/stream` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskEvent {
    /// Announces a newly created task.
    Task(Task),
    StatusUpdate(TaskStatusUpdateEvent),
    ArtifactUpdate(TaskArtifactUpdateEvent),
    Message(Message),
}

impl TaskEvent {
    /// The task this event belongs to, if it names one.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Self::Task(task) => Some(&task.id),
            Self::StatusUpdate(update) => Some(&update.task_id),
            Self::ArtifactUpdate(update) => Some(&update.task_id),
            Self::Message(message) => message.task_id.as_deref(),
        }
    }

    /// Whether this is the last event of the stream for this interaction.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::StatusUpdate(update) if update.is_final)
    }
}

/// Ordered sink for task events.
#[async_trait::async_trait]
pub trait EventQueue: Send + Sync {
    /// Delivers `event` to whoever is listening.
    async fn enqueue_event(&self, event: TaskEvent) -> AgentResult<()>;
}

#[async_trait::async_trait]
impl<Q: EventQueue + ?Sized> EventQueue for Arc<Q> {
    async fn enqueue_event(&self, event: TaskEvent) -> AgentResult<()> {
        (**self).enqueue_event(event).await
    }
}

/// Event queue backed by an unbounded tokio channel.
///
/// The paired receiver is the consumer side, e.g. an SSE writer.
#[derive(Debug, Clone)]
pub struct ChannelEventQueue {
    sender: UnboundedSender<TaskEvent>,
}

impl ChannelEventQueue {
    /// Creates a queue and the receiver that drains it.
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<TaskEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait::async_trait]
impl EventQueue for ChannelEventQueue {
    async fn enqueue_event(&self, event: TaskEvent) -> AgentResult<()> {
        self.sender.send(event).map_err(|err| AgentError::EventQueueClosed {
            task_id: err.0.task_id().unwrap_or_default().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status;
    use a2a_types::TaskState;

    fn working(task_id: &str) -> TaskEvent {
        TaskEvent::StatusUpdate(status::status_update_event(
            task_id,
            "ctx",
            status::status_now(TaskState::Working, None),
            false,
        ))
    }

    #[tokio::test(flavor = "current_thread")]
    async fn channel_queue_preserves_order() {
        let (queue, mut rx) = ChannelEventQueue::new();

        queue.enqueue_event(working("a")).await.expect("enqueue");
        queue.enqueue_event(working("b")).await.expect("enqueue");

        let first = rx.recv().await.expect("first event");
        let second = rx.recv().await.expect("second event");
        assert_eq!(first.task_id(), Some("a"));
        assert_eq!(second.task_id(), Some("b"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn channel_queue_reports_closed_receiver() {
        let (queue, rx) = ChannelEventQueue::new();
        drop(rx);

        let err = queue.enqueue_event(working("task-7")).await.unwrap_err();
        assert!(matches!(err, AgentError::EventQueueClosed { ref task_id } if task_id == "task-7"));
    }

    #[test]
    fn final_flag_only_on_status_updates() {
        let mut update = status::status_update_event(
            "t",
            "c",
            status::status_now(TaskState::Completed, None),
            true,
        );
        assert!(TaskEvent::StatusUpdate(update.clone()).is_final());

        update.is_final = false;
        assert!(!TaskEvent::StatusUpdate(update).is_final());

        let message = a2a_types::new_agent_text_message("hi", Some("c"), Some("t"));
        let event = TaskEvent::Message(message);
        assert!(!event.is_final());
        assert_eq!(event.task_id(), Some("t"));
    }
}
