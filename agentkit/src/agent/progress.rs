//! Progress items yielded by an agent's output stream.
//!
//! Agents report progress with loosely shaped records:
//!
//! ```json
//! { "is_task_complete": false, "updates": "Looking up the policy..." }
//! { "is_task_complete": true, "content": "Your request was approved." }
//! { "is_task_complete": true, "content": { "response": { "result": "{\"type\":\"form\"}" } } }
//! ```
//!
//! This module decodes those records into [`ProgressItem`] once, at the
//! boundary, so the executor only ever matches on closed enums.

use crate::errors::{AgentError, AgentResult};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One element of an agent's output stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ProgressItem {
    /// Intermediate progress; the task keeps running.
    Working { updates: String },
    /// The agent finished its turn with final content.
    Complete { content: ItemContent },
}

/// Final content attached to a completed [`ProgressItem`].
#[derive(Debug, Clone, PartialEq)]
pub enum ItemContent {
    /// A plain-text answer.
    Text(String),
    /// A structured mapping, the shape agents use to ask for more input.
    Form(FormContent),
    /// Anything else: numbers, booleans, null, arrays.
    Other(Value),
}

/// A structured completion: `{ "response": { "result": "<encoded json>" } }`.
///
/// `response` and `result` are optional because agents do not always fill
/// them in; a form without an encoded result is not a usable request for input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormContent {
    pub response: Option<FormResponse>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormResponse {
    /// JSON-encoded form payload.
    pub result: Option<String>,
}

impl ProgressItem {
    /// Creates an intermediate progress item.
    pub fn working(updates: impl Into<String>) -> Self {
        Self::Working {
            updates: updates.into(),
        }
    }

    /// Creates a completion carrying a plain-text answer.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Complete {
            content: ItemContent::Text(text.into()),
        }
    }

    /// Creates a completion carrying a form whose payload is `encoded`.
    pub fn form(encoded: impl Into<String>) -> Self {
        Self::Complete {
            content: ItemContent::Form(FormContent {
                response: Some(FormResponse {
                    result: Some(encoded.into()),
                }),
            }),
        }
    }

    pub fn is_task_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Decodes a raw progress record.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MalformedItem`] when the record is not an object,
    /// `is_task_complete` is missing or not a boolean, an incomplete item has
    /// no string `updates`, or a complete item has no `content`.
    pub fn from_value(value: Value) -> AgentResult<Self> {
        let mut record = match value {
            Value::Object(record) => record,
            other => {
                return Err(malformed(format!(
                    "expected a JSON object, got {}",
                    value_kind(&other)
                )))
            }
        };

        let is_task_complete = match record.remove("is_task_complete") {
            Some(Value::Bool(flag)) => flag,
            Some(other) => {
                return Err(malformed(format!(
                    "is_task_complete must be a boolean, got {}",
                    value_kind(&other)
                )))
            }
            None => return Err(malformed("missing is_task_complete")),
        };

        if !is_task_complete {
            return match record.remove("updates") {
                Some(Value::String(updates)) => Ok(Self::Working { updates }),
                Some(other) => Err(malformed(format!(
                    "updates must be a string, got {}",
                    value_kind(&other)
                ))),
                None => Err(malformed("incomplete item without updates")),
            };
        }

        record
            .remove("content")
            .map(|content| Self::Complete {
                content: ItemContent::from(content),
            })
            .ok_or_else(|| malformed("complete item without content"))
    }

    /// Decodes a progress record from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MalformedItem`] if the text is not JSON or the
    /// record has the wrong shape.
    pub fn from_json(json: &str) -> AgentResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?;
        Self::from_value(value)
    }
}

impl TryFrom<Value> for ProgressItem {
    type Error = AgentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Value> for ItemContent {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Object(map) => Self::Form(FormContent::from_map(&map)),
            other => Self::Other(other),
        }
    }
}

impl FormContent {
    fn from_map(map: &Map<String, Value>) -> Self {
        let response = map
            .get("response")
            .and_then(Value::as_object)
            .map(|response| FormResponse {
                result: response
                    .get("result")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            });
        Self { response }
    }

    /// The encoded form payload, if the agent supplied one.
    pub fn result(&self) -> Option<&str> {
        self.response.as_ref()?.result.as_deref()
    }
}

fn malformed(reason: impl Into<String>) -> AgentError {
    AgentError::MalformedItem {
        reason: reason.into(),
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
