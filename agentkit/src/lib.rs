//! # agentkit
//!
//! Adapts an autonomous agent that streams progress reports to the A2A task
//! lifecycle.
//!
//! - [`agent`]: the [`Agent`](agent::Agent) seam and the progress item model
//! - [`executor`]: [`StreamTranslator`](executor::StreamTranslator), which
//!   turns progress items into task events
//! - [`events`]: event queues, the per-task event bus and the task updater
//! - [`task`]: task creation and an in-memory task store
//!
//! ```no_run
//! use std::sync::Arc;
//! use agentkit::agent::{Agent, ProgressItem, ProgressStream};
//! use agentkit::events::ChannelEventQueue;
//! use agentkit::executor::{AgentExecutor, RequestContext, StreamTranslator};
//!
//! struct Echo;
//!
//! impl Agent for Echo {
//!     fn stream(&self, query: &str, _context_id: &str) -> ProgressStream {
//!         let items = vec![
//!             Ok(ProgressItem::working("thinking")),
//!             Ok(ProgressItem::text(query.to_string())),
//!         ];
//!         Box::pin(futures::stream::iter(items))
//!     }
//! }
//!
//! # async fn run(message: agentkit::a2a::Message) -> agentkit::AgentResult<()> {
//! let executor = StreamTranslator::new(Arc::new(Echo));
//! let (queue, mut events) = ChannelEventQueue::new();
//! executor.execute(RequestContext::new(message), &queue).await?;
//! while let Ok(event) = events.try_recv() {
//!     println!("{}", serde_json::to_string(&event)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod errors;
pub mod events;
pub mod executor;
pub mod logging;
pub mod status;
pub mod task;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use a2a_types as a2a;
pub use errors::{AgentError, AgentResult};
