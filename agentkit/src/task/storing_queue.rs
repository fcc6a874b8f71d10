use crate::errors::AgentResult;
use crate::events::{EventQueue, TaskEvent};
use crate::task::TaskStore;
use std::sync::Arc;

/// Records every event in a [`TaskStore`] before handing it on.
///
/// Wrap the delivery queue with this to keep the stored task in step with
/// what subscribers see. A store failure stops the event from being
/// forwarded.
pub struct StoringEventQueue<Q> {
    store: Arc<dyn TaskStore>,
    inner: Q,
}

impl<Q: EventQueue> StoringEventQueue<Q> {
    pub fn new(store: Arc<dyn TaskStore>, inner: Q) -> Self {
        Self { store, inner }
    }
}

#[async_trait::async_trait]
impl<Q: EventQueue> EventQueue for StoringEventQueue<Q> {
    async fn enqueue_event(&self, event: TaskEvent) -> AgentResult<()> {
        self.store.apply_event(&event).await?;
        self.inner.enqueue_event(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChannelEventQueue;
    use crate::status;
    use crate::task::InMemoryTaskStore;
    use a2a_types::TaskState;

    #[tokio::test(flavor = "current_thread")]
    async fn events_are_stored_then_forwarded() {
        let store = Arc::new(InMemoryTaskStore::new());
        let (channel, mut rx) = ChannelEventQueue::new();
        let queue = StoringEventQueue::new(store.clone(), channel);

        let message = a2a_types::new_agent_text_message("hi", Some("ctx"), Some("task"));
        let task = a2a_types::new_task(&message);
        queue
            .enqueue_event(TaskEvent::Task(task))
            .await
            .expect("enqueue");
        queue
            .enqueue_event(TaskEvent::StatusUpdate(status::status_update_event(
                "task",
                "ctx",
                status::status_now(TaskState::Completed, None),
                true,
            )))
            .await
            .expect("enqueue");

        assert!(matches!(rx.recv().await, Some(TaskEvent::Task(_))));
        assert!(matches!(rx.recv().await, Some(TaskEvent::StatusUpdate(_))));

        let stored = store.get_task("task").await.expect("get").expect("task");
        assert_eq!(stored.status.state, TaskState::Completed);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn store_failures_block_forwarding() {
        let store = Arc::new(InMemoryTaskStore::new());
        let (channel, mut rx) = ChannelEventQueue::new();
        let queue = StoringEventQueue::new(store, channel);

        let result = queue
            .enqueue_event(TaskEvent::StatusUpdate(status::status_update_event(
                "unknown",
                "ctx",
                status::status_now(TaskState::Working, None),
                false,
            )))
            .await;

        assert!(result.is_err());
        drop(queue);
        assert!(rx.recv().await.is_none());
    }
}
