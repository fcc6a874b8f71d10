//! Task creation and persistence.
//!
//! The executor only needs a [`TaskFactory`] to mint a task for a request
//! that has none. The [`TaskStore`] side is for the delivery layer: it
//! projects the emitted [`TaskEvent`]s onto stored tasks so that `tasks/get`
//! can answer with the latest state.

pub mod in_memory;
pub mod storing_queue;

pub use in_memory::InMemoryTaskStore;
pub use storing_queue::StoringEventQueue;

use crate::errors::AgentResult;
use crate::events::TaskEvent;
use a2a_types::{Message, Task};

/// Creates the task bound to an inbound request.
pub trait TaskFactory: Send + Sync {
    fn new_task(&self, message: &Message) -> Task;
}

/// Reuses client-supplied identifiers and generates UUIDs for the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTaskFactory;

impl TaskFactory for DefaultTaskFactory {
    fn new_task(&self, message: &Message) -> Task {
        a2a_types::new_task(message)
    }
}

/// Persistence for tasks and the events that change them.
#[async_trait::async_trait]
pub trait TaskStore: Send + Sync {
    /// Retrieves a single task by its ID.
    async fn get_task(&self, task_id: &str) -> AgentResult<Option<Task>>;

    /// Stores or replaces a task. This is an upsert operation.
    async fn save_task(&self, task: &Task) -> AgentResult<()>;

    /// Applies an event to the task it names.
    async fn apply_event(&self, event: &TaskEvent) -> AgentResult<()>;
}
