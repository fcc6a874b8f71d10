//! Shared fakes for agentkit tests.
//!
//! Available under `cfg(test)` and with the `test-support` feature, so
//! integration tests and downstream crates can drive a
//! [`StreamTranslator`](crate::executor::StreamTranslator) without a real agent.

use std::sync::{Arc, Mutex};

use crate::agent::{Agent, ProgressItem, ProgressStream};
use crate::errors::{AgentError, AgentResult};
use crate::events::{EventQueue, TaskEvent};
use a2a_types::{Message, MessageRole, Part};

/// An agent that replays a fixed script of progress items.
///
/// The script is handed out on the first call to [`Agent::stream`]; later
/// calls get an empty stream. Every call is recorded as
/// `(query, context_id)`.
#[derive(Clone, Default)]
pub struct ScriptedAgent {
    script: Arc<Mutex<Option<Vec<AgentResult<ProgressItem>>>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedAgent {
    #[must_use]
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = AgentResult<ProgressItem>>,
    {
        Self {
            script: Arc::new(Mutex::new(Some(items.into_iter().collect()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script with only successful items.
    #[must_use]
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = ProgressItem>,
    {
        Self::new(items.into_iter().map(Ok))
    }

    /// The `(query, context_id)` pairs the agent has been asked to handle.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .expect("scripted agent calls mutex poisoned")
            .clone()
    }
}

impl Agent for ScriptedAgent {
    fn stream(&self, query: &str, context_id: &str) -> ProgressStream {
        self.calls
            .lock()
            .expect("scripted agent calls mutex poisoned")
            .push((query.to_string(), context_id.to_string()));

        let items = self
            .script
            .lock()
            .expect("scripted agent script mutex poisoned")
            .take()
            .unwrap_or_default();
        Box::pin(futures::stream::iter(items))
    }
}

/// An event queue that keeps everything it is given.
///
/// With [`RecordingQueue::failing_after`] it accepts a fixed number of events
/// and then behaves like a closed queue.
#[derive(Clone, Default)]
pub struct RecordingQueue {
    events: Arc<Mutex<Vec<TaskEvent>>>,
    capacity: Option<usize>,
}

impl RecordingQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing_after(accepted: usize) -> Self {
        Self {
            events: Arc::default(),
            capacity: Some(accepted),
        }
    }

    /// Snapshot of the events received so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events
            .lock()
            .expect("recording queue mutex poisoned")
            .clone()
    }
}

#[async_trait::async_trait]
impl EventQueue for RecordingQueue {
    async fn enqueue_event(&self, event: TaskEvent) -> AgentResult<()> {
        let mut events = self.events.lock().expect("recording queue mutex poisoned");
        if self.capacity.is_some_and(|capacity| events.len() >= capacity) {
            return Err(AgentError::EventQueueClosed {
                task_id: event.task_id().unwrap_or_default().to_string(),
            });
        }
        events.push(event);
        Ok(())
    }
}

/// A user message with a single text part and no task or context.
#[must_use]
pub fn user_message(text: impl Into<String>) -> Message {
    let mut message = a2a_types::new_agent_parts_message(vec![Part::text(text)], None, None);
    message.role = MessageRole::User;
    message
}

/// A user message continuing an existing conversation.
#[must_use]
pub fn user_message_in(text: impl Into<String>, context_id: &str, task_id: &str) -> Message {
    let mut message = user_message(text);
    message.context_id = Some(context_id.to_string());
    message.task_id = Some(task_id.to_string());
    message
}
