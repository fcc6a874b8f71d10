//! Fan-out of task events to live followers.
//!
//! A task streamed over SSE may have several followers at once: the original
//! `message/stream` caller, a client that reconnected with `tasks/resubscribe`,
//! a persistence worker. [`TaskEventBus`] is the [`EventQueue`] the executor
//! writes to; each follower reads its own copy of the task's events.

use crate::errors::AgentResult;
use crate::events::{EventQueue, TaskEvent};
use dashmap::DashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A follower's view of one task's events.
pub type TaskEventReceiver = UnboundedReceiver<TaskEvent>;

/// Routes each event to the followers of the task it names.
///
/// Followers that hang up are forgotten on the next event for their task,
/// and a task whose last follower left is removed from the routing table.
#[derive(Default)]
pub struct TaskEventBus {
    followers: DashMap<String, Vec<UnboundedSender<TaskEvent>>>,
}

impl TaskEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts following `task_id`. Only events published afterwards arrive.
    #[must_use]
    pub fn subscribe(&self, task_id: &str) -> TaskEventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.followers
            .entry(task_id.to_string())
            .or_default()
            .push(tx);
        rx
    }

    /// Hands a copy of `event` to every follower of its task.
    ///
    /// Events that name no task, or whose task nobody follows, go nowhere.
    pub fn publish(&self, event: &TaskEvent) {
        let Some(task_id) = event.task_id() else {
            return;
        };

        self.followers.remove_if_mut(task_id, |_, senders| {
            senders.retain(|tx| tx.send(event.clone()).is_ok());
            senders.is_empty()
        });
    }

    /// Number of tasks with at least one follower.
    pub fn active_tasks(&self) -> usize {
        self.followers.len()
    }
}

#[async_trait::async_trait]
impl EventQueue for TaskEventBus {
    async fn enqueue_event(&self, event: TaskEvent) -> AgentResult<()> {
        self.publish(&event);
        Ok(())
    }
}
