//! Bridges agents that report progress as newline-delimited JSON.
//!
//! Out-of-process agents (a child process, a socket) typically write one
//! progress record per line. [`json_lines`] turns such a reader into a
//! [`ProgressStream`].

use crate::agent::{ProgressItem, ProgressStream};
use crate::errors::AgentError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Reads progress records from `reader`, one JSON object per line.
///
/// Blank lines are skipped. A line that is not UTF-8 or fails to decode
/// yields [`AgentError::MalformedItem`] and reading continues; an I/O error
/// yields [`AgentError::AgentStream`] and ends the stream.
pub fn json_lines<R>(reader: R) -> ProgressStream
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut segments = reader.split(b'\n');
        loop {
            match segments.next_segment().await {
                Ok(Some(bytes)) => {
                    let line = match String::from_utf8(bytes) {
                        Ok(line) => line,
                        Err(err) => {
                            yield Err(AgentError::MalformedItem {
                                reason: format!("line is not valid UTF-8: {err}"),
                            });
                            continue;
                        }
                    };
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    yield ProgressItem::from_json(trimmed);
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to read agent output");
                    yield Err(AgentError::agent_stream(err));
                    break;
                }
            }
        }
    })
}
