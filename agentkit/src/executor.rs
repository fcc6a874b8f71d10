//! Translation of an agent's progress stream into A2A task lifecycle events.
//!
//! [`StreamTranslator`] is the [`AgentExecutor`] that sits between an A2A
//! request handler and an [`Agent`]. For each request it resolves the task,
//! pulls progress items one at a time, and turns each one into status and
//! artifact updates on the supplied [`EventQueue`]. The first completion item
//! ends the invocation.

use crate::agent::progress::value_kind;
use crate::agent::{Agent, ItemContent, ProgressItem};
use crate::config::{ExecutorConfig, MalformedFormPolicy};
use crate::errors::{AgentError, AgentResult};
use crate::events::{EventQueue, TaskEvent, TaskUpdater};
use crate::task::{DefaultTaskFactory, TaskFactory};
use a2a_types::{Message, Part, Task, TaskState};
use futures::StreamExt;
use std::sync::Arc;

/// Everything an executor needs to know about one inbound request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// The message that triggered the request.
    pub message: Option<Message>,
    /// The task this request continues, if the handler already has one.
    pub current_task: Option<Task>,
}

impl RequestContext {
    pub fn new(message: Message) -> Self {
        Self {
            message: Some(message),
            current_task: None,
        }
    }

    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.current_task = Some(task);
        self
    }
}

/// Handles `message/send`, `message/stream` and `tasks/cancel` for an agent.
#[async_trait::async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Runs the agent for the request and publishes its progress.
    async fn execute(&self, context: RequestContext, queue: &dyn EventQueue) -> AgentResult<()>;

    /// Requests cancellation of the task in `context`.
    async fn cancel(&self, context: RequestContext, queue: &dyn EventQueue) -> AgentResult<()>;
}

/// Maps an [`Agent`]'s progress stream onto task lifecycle updates.
///
/// | Item | Emitted |
/// |---|---|
/// | working | *working* status with the agent's update text |
/// | form with result | *input-required* with the decoded form as a data part (final) |
/// | form without result | *failed* (final) |
/// | text | artifact with the text, then *completed* (final) |
/// | anything else | *failed* (final) |
///
/// Cloning is cheap; clones share the agent and the task factory.
#[derive(Clone)]
pub struct StreamTranslator {
    agent: Arc<dyn Agent>,
    task_factory: Arc<dyn TaskFactory>,
    config: ExecutorConfig,
}

impl StreamTranslator {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self {
            agent,
            task_factory: Arc::new(DefaultTaskFactory),
            config: ExecutorConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_task_factory(mut self, task_factory: Arc<dyn TaskFactory>) -> Self {
        self.task_factory = task_factory;
        self
    }

    /// Runs one invocation.
    ///
    /// Without `existing_task` a new task is created and announced on `queue`
    /// before any update. Each item is fully emitted before the next one is
    /// pulled. Returns `Ok(())` both after a terminal update and when the
    /// agent stream runs dry without one.
    ///
    /// # Errors
    ///
    /// * [`AgentError::UnsupportedOperation`] if `message` is absent; nothing
    ///   is created or emitted.
    /// * [`AgentError::MalformedPayload`] for an undecodable form under
    ///   [`MalformedFormPolicy::Propagate`].
    /// * Any error yielded by the agent stream or returned by the queue,
    ///   unchanged.
    #[tracing::instrument(
        name = "agentkit.executor.run",
        skip_all,
        fields(
            task.id = tracing::field::Empty,
            context.id = tracing::field::Empty,
            agent.items = tracing::field::Empty,
        )
    )]
    pub async fn run(
        &self,
        message: Option<Message>,
        existing_task: Option<Task>,
        queue: &dyn EventQueue,
    ) -> AgentResult<()> {
        let Some(message) = message else {
            return Err(AgentError::UnsupportedOperation {
                operation: "execute without a request message".to_string(),
            });
        };

        let task = match existing_task {
            Some(task) => task,
            None => {
                let task = self.task_factory.new_task(&message);
                queue.enqueue_event(TaskEvent::Task(task.clone())).await?;
                task
            }
        };

        let span = tracing::Span::current();
        span.record("task.id", task.id.as_str());
        span.record("context.id", task.context_id.as_str());

        let updater = TaskUpdater::new(queue, task.id.as_str(), task.context_id.as_str());
        let query = a2a_types::text_from_message(&message);
        let mut items = self.agent.stream(&query, &task.context_id);
        let mut seen = 0usize;

        while let Some(item) = items.next().await {
            let item = item?;
            seen += 1;
            span.record("agent.items", seen);
            tracing::debug!(
                item = seen,
                complete = item.is_task_complete(),
                "agent progress"
            );

            match item {
                ProgressItem::Working { updates } => {
                    let message = updater.new_text_message(updates);
                    updater
                        .update_status(TaskState::Working, Some(message), false)
                        .await?;
                }
                ProgressItem::Complete { content } => {
                    return self.finish(&updater, content).await;
                }
            }
        }

        tracing::warn!(
            items = seen,
            "agent stream ended without a completion; task left in its last state"
        );
        Ok(())
    }

    async fn finish(&self, updater: &TaskUpdater<'_>, content: ItemContent) -> AgentResult<()> {
        match content {
            ItemContent::Text(text) => {
                updater
                    .add_artifact(vec![Part::text(text)], Some(&self.config.artifact_name))
                    .await?;
                updater.complete(None).await
            }
            ItemContent::Form(form) => match form.result() {
                Some(encoded) => self.request_input(updater, encoded).await,
                None => {
                    tracing::warn!("form completion without a result");
                    let message = updater.new_text_message(&self.config.unexpected_state_message);
                    updater.failed(Some(message)).await
                }
            },
            ItemContent::Other(value) => {
                tracing::warn!(content.kind = value_kind(&value), "unsupported completion content");
                let message = updater.new_text_message(&self.config.unsupported_content_message);
                updater.failed(Some(message)).await
            }
        }
    }

    async fn request_input(&self, updater: &TaskUpdater<'_>, encoded: &str) -> AgentResult<()> {
        let error = match serde_json::from_str(encoded) {
            Ok(form) => {
                let message = updater.new_agent_message(vec![Part::data(form)]);
                return updater.requires_input(Some(message), true).await;
            }
            Err(error) => error,
        };

        match self.config.malformed_form {
            MalformedFormPolicy::Fail => {
                tracing::warn!(error = %error, "form payload is not valid JSON");
                let message = updater.new_text_message(format!("Malformed form payload: {error}"));
                updater.failed(Some(message)).await
            }
            MalformedFormPolicy::Propagate => Err(AgentError::MalformedPayload {
                reason: error.to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl AgentExecutor for StreamTranslator {
    async fn execute(&self, context: RequestContext, queue: &dyn EventQueue) -> AgentResult<()> {
        self.run(context.message, context.current_task, queue).await
    }

    async fn cancel(&self, context: RequestContext, _queue: &dyn EventQueue) -> AgentResult<()> {
        tracing::debug!(
            task.id = context.current_task.as_ref().map(|t| t.id.as_str()),
            "cancel requested"
        );
        Err(AgentError::UnsupportedOperation {
            operation: "tasks/cancel".to_string(),
        })
    }
}
