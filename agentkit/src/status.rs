//! Status helpers for the A2A task lifecycle.
//!
//! Centralizes how statuses and status-update events are built, and which
//! states end an invocation, so the executor and the task store agree.

use a2a_types::{Message, TaskState, TaskStatus, TaskStatusUpdateEvent};

/// Builds a status stamped with the current time.
#[must_use]
pub fn status_now(state: TaskState, message: Option<Message>) -> TaskStatus {
    TaskStatus {
        state,
        timestamp: Some(now()),
        message,
    }
}

/// Creates a `TaskStatusUpdateEvent` from a task status.
///
/// # Arguments
/// * `task_id` - The unique identifier of the task
/// * `context_id` - The context identifier grouping related tasks
/// * `status` - The new status of the task
/// * `is_final` - Whether this is the last event of the interaction
#[must_use]
pub fn status_update_event(
    task_id: &str,
    context_id: &str,
    status: TaskStatus,
    is_final: bool,
) -> TaskStatusUpdateEvent {
    TaskStatusUpdateEvent {
        kind: a2a_types::STATUS_UPDATE_KIND.to_string(),
        task_id: task_id.to_string(),
        context_id: context_id.to_string(),
        status,
        is_final,
        metadata: None,
    }
}

/// Checks if a `TaskState` is terminal (the task can never move again).
///
/// `InputRequired` is NOT terminal for the task: it resumes once the client
/// answers. See [`ends_invocation`].
#[must_use]
pub const fn is_terminal_state(state: TaskState) -> bool {
    matches!(
        state,
        TaskState::Completed | TaskState::Failed | TaskState::Rejected | TaskState::Canceled
    )
}

/// Checks if reaching `state` ends the current executor invocation.
///
/// This is every terminal state plus `InputRequired`, after which the agent
/// waits for the next request instead of producing more updates.
#[must_use]
pub const fn ends_invocation(state: TaskState) -> bool {
    is_terminal_state(state) || matches!(state, TaskState::InputRequired)
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
