//! The agent seam.
//!
//! An [`Agent`] turns a query into a lazy stream of [`ProgressItem`]s. The
//! executor never looks inside the agent; it only pulls items, one at a time,
//! and translates each into task lifecycle updates.

pub mod json_lines;
pub mod progress;

pub use json_lines::json_lines;
pub use progress::{FormContent, FormResponse, ItemContent, ProgressItem};

use crate::errors::AgentResult;
use futures::stream::BoxStream;

/// Stream of progress produced for one query.
pub type ProgressStream = BoxStream<'static, AgentResult<ProgressItem>>;

/// An autonomous agent that reports its work as a stream of progress items.
///
/// Each call to [`Agent::stream`] starts a fresh run; streams are not
/// restartable. A well-behaved agent ends its stream with a completion item,
/// but callers must cope with streams that simply run dry.
pub trait Agent: Send + Sync {
    /// Starts working on `query` within the conversation `context_id`.
    fn stream(&self, query: &str, context_id: &str) -> ProgressStream;
}
