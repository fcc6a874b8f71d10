//! In-memory implementation of the [`TaskStore`] trait.

use crate::errors::{AgentError, AgentResult};
use crate::events::TaskEvent;
use crate::task::TaskStore;
use a2a_types::{Task, TaskArtifactUpdateEvent};
use dashmap::DashMap;
use std::sync::Arc;

/// An in-memory, thread-safe [`TaskStore`].
///
/// Uses `DashMap` for concurrent access, so concurrent invocations for
/// different tasks never contend on a single lock.
///
/// # Examples
///
/// ```
/// use agentkit::events::TaskEvent;
/// use agentkit::task::{InMemoryTaskStore, TaskStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> agentkit::AgentResult<()> {
/// let store = InMemoryTaskStore::new();
/// let message = a2a_types::new_agent_text_message("hello", None, None);
/// let task = a2a_types::new_task(&message);
///
/// store.apply_event(&TaskEvent::Task(task.clone())).await?;
/// assert_eq!(store.get_task(&task.id).await?, Some(task));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskStore {
    tasks: Arc<DashMap<String, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn with_task<F>(&self, task_id: &str, apply: F) -> AgentResult<()>
    where
        F: FnOnce(&mut Task),
    {
        let mut task = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| AgentError::TaskNotFound {
                task_id: task_id.to_string(),
            })?;
        apply(task.value_mut());
        Ok(())
    }
}

#[async_trait::async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn get_task(&self, task_id: &str) -> AgentResult<Option<Task>> {
        Ok(self.tasks.get(task_id).map(|t| t.value().clone()))
    }

    async fn save_task(&self, task: &Task) -> AgentResult<()> {
        self.tasks.insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn apply_event(&self, event: &TaskEvent) -> AgentResult<()> {
        match event {
            TaskEvent::Task(task) => self.save_task(task).await,
            TaskEvent::StatusUpdate(update) => self.with_task(&update.task_id, |task| {
                if let Some(message) = &update.status.message {
                    task.history.push(message.clone());
                }
                task.status = update.status.clone();
            }),
            TaskEvent::ArtifactUpdate(update) => {
                self.with_task(&update.task_id, |task| merge_artifact(task, update))
            }
            TaskEvent::Message(message) => match message.task_id.as_deref() {
                Some(task_id) => self.with_task(task_id, |task| task.history.push(message.clone())),
                // Messages outside any task have nowhere to go.
                None => Ok(()),
            },
        }
    }
}

fn merge_artifact(task: &mut Task, update: &TaskArtifactUpdateEvent) {
    let incoming = &update.artifact;
    match task
        .artifacts
        .iter_mut()
        .find(|existing| existing.artifact_id == incoming.artifact_id)
    {
        Some(existing) if update.append == Some(true) => {
            existing.parts.extend(incoming.parts.iter().cloned());
        }
        Some(existing) => *existing = incoming.clone(),
        None => task.artifacts.push(incoming.clone()),
    }
}
