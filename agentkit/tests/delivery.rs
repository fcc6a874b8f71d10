use std::io::Cursor;
use std::sync::Arc;

use a2a_types::{Part, TaskState};
use agentkit::agent::{json_lines, Agent, ProgressStream};
use agentkit::events::{ChannelEventQueue, TaskEvent, TaskEventBus};
use agentkit::executor::{AgentExecutor, RequestContext, StreamTranslator};
use agentkit::task::{InMemoryTaskStore, StoringEventQueue, TaskStore};
use agentkit::test_support::{user_message_in, RecordingQueue};
use tokio::io::BufReader;

/// Replays a newline-delimited transcript, the way an out-of-process agent
/// would write it.
struct TranscriptAgent {
    transcript: &'static str,
}

impl Agent for TranscriptAgent {
    fn stream(&self, _query: &str, _context_id: &str) -> ProgressStream {
        json_lines(BufReader::new(Cursor::new(self.transcript.as_bytes())))
    }
}

const BOOKING: &str = r#"
{"is_task_complete": false, "updates": "Checking availability"}

{"is_task_complete": false, "updates": "Holding seat 14C"}
{"is_task_complete": true, "content": "Seat 14C confirmed"}
"#;

const NEEDS_DETAILS: &str = r#"{"is_task_complete": true, "content": {"response": {"result": "{\"fields\":[\"passport\"]}"}}}"#;

#[tokio::test(flavor = "current_thread")]
async fn store_tracks_what_subscribers_see() {
    let store = Arc::new(InMemoryTaskStore::new());
    let bus = Arc::new(TaskEventBus::new());
    let queue = StoringEventQueue::new(store.clone(), bus.clone());
    let mut subscriber = bus.subscribe("task-42");

    let translator = StreamTranslator::new(Arc::new(TranscriptAgent { transcript: BOOKING }));
    translator
        .execute(
            RequestContext::new(user_message_in("book seat", "ctx-42", "task-42")),
            &queue,
        )
        .await
        .expect("run succeeds");

    let mut seen = Vec::new();
    while let Ok(event) = subscriber.try_recv() {
        seen.push(event);
    }
    assert_eq!(seen.len(), 5, "task, two working updates, artifact, completion");
    assert!(matches!(seen[0], TaskEvent::Task(_)));
    assert!(seen[4].is_final());

    let task = store
        .get_task("task-42")
        .await
        .expect("store readable")
        .expect("task stored");
    assert_eq!(task.context_id, "ctx-42");
    assert_eq!(task.status.state, TaskState::Completed);
    assert_eq!(task.artifacts.len(), 1);
    assert_eq!(task.artifacts[0].parts, vec![Part::text("Seat 14C confirmed")]);
    // original request plus the two working messages
    assert_eq!(task.history.len(), 3);
}

#[tokio::test(flavor = "current_thread")]
async fn input_required_round_trip_through_existing_task() {
    let store = Arc::new(InMemoryTaskStore::new());
    let (channel, mut rx) = ChannelEventQueue::new();
    let queue = StoringEventQueue::new(store.clone(), channel);

    let first = StreamTranslator::new(Arc::new(TranscriptAgent {
        transcript: NEEDS_DETAILS,
    }));
    first
        .execute(
            RequestContext::new(user_message_in("book seat", "ctx-7", "task-7")),
            &queue,
        )
        .await
        .expect("first turn");

    let paused = store.get_task("task-7").await.expect("get").expect("task");
    assert_eq!(paused.status.state, TaskState::InputRequired);
    let form = paused
        .status
        .message
        .as_ref()
        .and_then(|m| m.parts.first())
        .and_then(Part::as_data)
        .cloned();
    assert_eq!(form, Some(serde_json::json!({ "fields": ["passport"] })));

    let second = StreamTranslator::new(Arc::new(TranscriptAgent { transcript: BOOKING }));
    second
        .execute(
            RequestContext::new(user_message_in("passport X123", "ctx-7", "task-7"))
                .with_task(paused),
            &queue,
        )
        .await
        .expect("second turn");

    let done = store.get_task("task-7").await.expect("get").expect("task");
    assert_eq!(done.status.state, TaskState::Completed);

    let mut announcements = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, TaskEvent::Task(_)) {
            announcements += 1;
        }
    }
    assert_eq!(announcements, 1, "the resumed turn reuses the task");
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_transcript_lines_surface_as_errors() {
    let agent = TranscriptAgent {
        transcript: "{\"is_task_complete\": false, \"updates\": \"ok\"}\nnot json\n",
    };
    let queue = RecordingQueue::new();

    let err = StreamTranslator::new(Arc::new(agent))
        .execute(
            RequestContext::new(user_message_in("go", "ctx", "task")),
            &queue,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, agentkit::AgentError::MalformedItem { .. }));
    assert_eq!(queue.events().len(), 2);
}

#[test]
fn events_serialize_as_bare_a2a_objects() {
    let message = user_message_in("hi", "ctx", "task");
    let event = TaskEvent::Task(a2a_types::new_task(&message));

    let value = serde_json::to_value(&event).expect("serializes");
    assert_eq!(value["kind"], "task");
    assert_eq!(value["id"], "task");
    assert_eq!(value["contextId"], "ctx");
    assert_eq!(value["status"]["state"], "submitted");
}
