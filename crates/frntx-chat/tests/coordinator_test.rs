use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use frntx_assistants::error::Result as ApiResult;
use frntx_assistants::types::{
    Assistant, CreateAssistant, ModelInfo, Run, RunStatus, StoredFile, ThreadMessage, ThreadObject,
    ToolOutput, UpdateAssistant, VectorStore, VectorStoreFile,
};
use frntx_assistants::{
    AssistantsApi, AssistantsError, MessageContent, MessageRole, RunEvent, RunEventStream,
};
use frntx_chat::{
    run_exchange, ChatError, ChatRole, CoordinatorConfig, RunCoordinator, RunTimer, Transcript,
};

// ============================================================================
// FAKES
// ============================================================================

/// In-memory stand-in for the hosted API. Records every call, serves a
/// scripted sequence of run statuses, and appends the scripted reply when
/// the run completes.
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
    statuses: Mutex<VecDeque<RunStatus>>,
    reply: Option<String>,
    messages: Mutex<Vec<ThreadMessage>>,
    stream_events: Mutex<Option<Vec<ApiResult<RunEvent>>>>,
}

impl FakeApi {
    fn with_statuses(statuses: &[RunStatus]) -> Self {
        Self {
            statuses: Mutex::new(statuses.iter().copied().collect()),
            ..Default::default()
        }
    }

    fn reply(mut self, text: &str) -> Self {
        self.reply = Some(text.to_string());
        self
    }

    fn with_stream(events: Vec<ApiResult<RunEvent>>) -> Self {
        Self {
            stream_events: Mutex::new(Some(events)),
            ..Default::default()
        }
    }

    fn log(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn retrieve_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.as_str() == "retrieve_run")
            .count()
    }

    fn message(id: &str, role: MessageRole, text: &str, created_at: i64) -> ThreadMessage {
        ThreadMessage {
            id: id.to_string(),
            role,
            content: vec![MessageContent::text(text)],
            created_at,
        }
    }
}

#[async_trait]
impl AssistantsApi for FakeApi {
    async fn create_message(
        &self,
        _thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> ApiResult<ThreadMessage> {
        self.log("create_message");
        let mut messages = self.messages.lock().unwrap();
        let message = Self::message(
            &format!("msg_{}", messages.len()),
            role,
            content,
            messages.len() as i64,
        );
        messages.push(message.clone());
        Ok(message)
    }

    async fn list_messages(&self, _thread_id: &str) -> ApiResult<Vec<ThreadMessage>> {
        self.log("list_messages");
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> ApiResult<Run> {
        self.log("create_run");
        Ok(Run {
            id: "run_1".to_string(),
            thread_id: thread_id.to_string(),
            assistant_id: assistant_id.to_string(),
            status: RunStatus::Queued,
            last_error: None,
            required_action: None,
        })
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> ApiResult<Run> {
        self.log("retrieve_run");
        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front().unwrap()
        } else {
            *statuses.front().expect("status script exhausted")
        };

        if status == RunStatus::Completed {
            if let Some(reply) = &self.reply {
                let mut messages = self.messages.lock().unwrap();
                let already_replied = messages
                    .iter()
                    .any(|m| m.role == MessageRole::Assistant && m.text() == *reply);
                if !already_replied {
                    let message = Self::message(
                        "msg_reply",
                        MessageRole::Assistant,
                        reply,
                        messages.len() as i64,
                    );
                    messages.push(message);
                }
            }
        }

        Ok(Run {
            id: run_id.to_string(),
            thread_id: thread_id.to_string(),
            assistant_id: "a_1".to_string(),
            status,
            last_error: None,
            required_action: None,
        })
    }

    async fn stream_run(&self, _thread_id: &str, _assistant_id: &str) -> ApiResult<RunEventStream> {
        self.log("stream_run");
        let events = self
            .stream_events
            .lock()
            .unwrap()
            .take()
            .expect("stream script exhausted");
        Ok(Box::pin(futures::stream::iter(events)))
    }

    // Surface not exercised by the coordinator.

    async fn create_assistant(&self, _req: CreateAssistant) -> ApiResult<Assistant> {
        unimplemented!()
    }
    async fn list_assistants(&self) -> ApiResult<Vec<Assistant>> {
        unimplemented!()
    }
    async fn retrieve_assistant(&self, _assistant_id: &str) -> ApiResult<Assistant> {
        unimplemented!()
    }
    async fn update_assistant(
        &self,
        _assistant_id: &str,
        _req: UpdateAssistant,
    ) -> ApiResult<Assistant> {
        unimplemented!()
    }
    async fn delete_assistant(&self, _assistant_id: &str) -> ApiResult<()> {
        unimplemented!()
    }
    async fn create_thread(&self) -> ApiResult<ThreadObject> {
        unimplemented!()
    }
    async fn retrieve_thread(&self, _thread_id: &str) -> ApiResult<ThreadObject> {
        unimplemented!()
    }
    async fn delete_thread(&self, _thread_id: &str) -> ApiResult<()> {
        unimplemented!()
    }
    async fn submit_tool_outputs(
        &self,
        _thread_id: &str,
        _run_id: &str,
        _outputs: Vec<ToolOutput>,
    ) -> ApiResult<RunEventStream> {
        unimplemented!()
    }
    async fn create_vector_store(&self, _name: &str) -> ApiResult<VectorStore> {
        unimplemented!()
    }
    async fn update_vector_store(&self, _store_id: &str, _name: &str) -> ApiResult<VectorStore> {
        unimplemented!()
    }
    async fn list_vector_stores(&self) -> ApiResult<Vec<VectorStore>> {
        unimplemented!()
    }
    async fn create_vector_store_file(
        &self,
        _store_id: &str,
        _file_id: &str,
    ) -> ApiResult<VectorStoreFile> {
        unimplemented!()
    }
    async fn list_vector_store_files(&self, _store_id: &str) -> ApiResult<Vec<VectorStoreFile>> {
        unimplemented!()
    }
    async fn retrieve_vector_store_file(
        &self,
        _store_id: &str,
        _file_id: &str,
    ) -> ApiResult<VectorStoreFile> {
        unimplemented!()
    }
    async fn delete_vector_store_file(&self, _store_id: &str, _file_id: &str) -> ApiResult<()> {
        unimplemented!()
    }
    async fn upload_file(&self, _filename: &str, _bytes: Vec<u8>) -> ApiResult<StoredFile> {
        unimplemented!()
    }
    async fn list_files(&self) -> ApiResult<Vec<StoredFile>> {
        unimplemented!()
    }
    async fn retrieve_file(&self, _file_id: &str) -> ApiResult<StoredFile> {
        unimplemented!()
    }
    async fn file_content(&self, _file_id: &str) -> ApiResult<Bytes> {
        unimplemented!()
    }
    async fn list_models(&self) -> ApiResult<Vec<ModelInfo>> {
        unimplemented!()
    }
}

/// Timer that resolves immediately and counts how often it was scheduled.
#[derive(Default)]
struct CountingTimer {
    sleeps: AtomicU32,
}

#[async_trait]
impl RunTimer for CountingTimer {
    async fn sleep(&self, _duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
    }
}

fn coordinator(api: Arc<FakeApi>, timer: Arc<CountingTimer>) -> RunCoordinator {
    RunCoordinator::new(api).with_timer(timer)
}

// ============================================================================
// POLL VARIANT
// ============================================================================

#[tokio::test]
async fn polls_until_terminal_then_fetches_reply() {
    let api = Arc::new(
        FakeApi::with_statuses(&[
            RunStatus::Queued,
            RunStatus::InProgress,
            RunStatus::Completed,
        ])
        .reply("Hi there"),
    );
    let timer = Arc::new(CountingTimer::default());

    let reply = coordinator(api.clone(), timer.clone())
        .submit_message("t_1", "a_1", "Hello")
        .await
        .unwrap();

    assert_eq!(reply.role, MessageRole::Assistant);
    assert_eq!(reply.text(), "Hi there");

    // Exactly three status checks, with a delay between each pair, and no
    // check after the terminal one.
    assert_eq!(api.retrieve_count(), 3);
    assert_eq!(timer.sleeps.load(Ordering::SeqCst), 2);

    // Append precedes run creation; observation precedes the final fetch.
    assert_eq!(
        api.calls(),
        vec![
            "create_message",
            "create_run",
            "retrieve_run",
            "retrieve_run",
            "retrieve_run",
            "list_messages",
        ]
    );
}

#[tokio::test]
async fn exchange_appends_one_user_then_one_assistant_message() {
    let api = Arc::new(FakeApi::with_statuses(&[RunStatus::Completed]).reply("Hi there"));
    let timer = Arc::new(CountingTimer::default());

    coordinator(api.clone(), timer)
        .submit_message("t_1", "a_1", "Hello")
        .await
        .unwrap();

    let messages = api.messages.lock().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].text(), "Hello");
    assert_eq!(messages[1].role, MessageRole::Assistant);
    assert_eq!(messages[1].text(), "Hi there");
}

#[tokio::test]
async fn failed_run_rejects_in_strict_mode() {
    let api = Arc::new(FakeApi::with_statuses(&[
        RunStatus::Queued,
        RunStatus::Failed,
    ]));
    let timer = Arc::new(CountingTimer::default());

    let result = coordinator(api.clone(), timer)
        .submit_message("t_1", "a_1", "Hello")
        .await;

    match result {
        Err(ChatError::RunUnsuccessful { status, .. }) => assert_eq!(status, RunStatus::Failed),
        other => panic!("expected RunUnsuccessful, got {other:?}"),
    }

    // No message fetch after an unsuccessful run.
    assert!(!api.calls().contains(&"list_messages".to_string()));
}

#[tokio::test]
async fn cancelled_run_rejects_in_strict_mode() {
    let api = Arc::new(FakeApi::with_statuses(&[RunStatus::Cancelled]));
    let timer = Arc::new(CountingTimer::default());

    let result = coordinator(api, timer)
        .submit_message("t_1", "a_1", "Hello")
        .await;
    assert!(matches!(result, Err(ChatError::RunUnsuccessful { .. })));
}

#[tokio::test]
async fn lenient_mode_resolves_any_terminal_status() {
    let api = Arc::new(FakeApi::with_statuses(&[RunStatus::Failed]));
    api.messages.lock().unwrap().push(FakeApi::message(
        "msg_old",
        MessageRole::Assistant,
        "stale reply",
        0,
    ));
    let timer = Arc::new(CountingTimer::default());

    let reply = RunCoordinator::new(api)
        .with_timer(timer)
        .with_config(CoordinatorConfig {
            fail_on_unsuccessful_run: false,
            ..CoordinatorConfig::default()
        })
        .submit_message("t_1", "a_1", "Hello")
        .await
        .unwrap();

    assert_eq!(reply.text(), "stale reply");
}

#[tokio::test]
async fn requires_action_is_not_terminal_for_polling() {
    let api = Arc::new(
        FakeApi::with_statuses(&[
            RunStatus::Queued,
            RunStatus::RequiresAction,
            RunStatus::Completed,
        ])
        .reply("done"),
    );
    let timer = Arc::new(CountingTimer::default());

    coordinator(api.clone(), timer)
        .submit_message("t_1", "a_1", "Hello")
        .await
        .unwrap();

    assert_eq!(api.retrieve_count(), 3);
}

#[tokio::test]
async fn empty_text_rejects_before_any_network_call() {
    let api = Arc::new(FakeApi::default());
    let timer = Arc::new(CountingTimer::default());
    let coordinator = coordinator(api.clone(), timer);

    let result = coordinator.submit_message("t_1", "a_1", "   ").await;
    assert!(matches!(result, Err(ChatError::EmptyMessage)));
    assert!(api.calls().is_empty());

    let result = coordinator.stream_message("t_1", "a_1", "").await;
    assert!(matches!(result, Err(ChatError::EmptyMessage)));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn poll_budget_is_enforced_when_configured() {
    let api = Arc::new(FakeApi::with_statuses(&[RunStatus::Queued]));
    let timer = Arc::new(CountingTimer::default());

    let result = RunCoordinator::new(api.clone())
        .with_timer(timer)
        .with_config(CoordinatorConfig {
            max_polls: Some(5),
            ..CoordinatorConfig::default()
        })
        .submit_message("t_1", "a_1", "Hello")
        .await;

    assert!(matches!(result, Err(ChatError::PollLimitReached)));
    assert_eq!(api.retrieve_count(), 5);
}

#[tokio::test]
async fn read_operations_are_idempotent() {
    let api = Arc::new(FakeApi::default());
    api.messages.lock().unwrap().push(FakeApi::message(
        "m1",
        MessageRole::User,
        "Hello",
        0,
    ));

    let first = api.list_messages("t_1").await.unwrap();
    let second = api.list_messages("t_1").await.unwrap();
    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].id, second[0].id);
    assert_eq!(first[0].text(), second[0].text());
}

// ============================================================================
// STREAM VARIANT
// ============================================================================

#[tokio::test]
async fn streamed_exchange_reconciles_into_transcript() {
    let api = Arc::new(FakeApi::with_stream(vec![
        Ok(RunEvent::TextCreated),
        Ok(RunEvent::TextDelta {
            value: Some("Hi ".to_string()),
            annotations: Vec::new(),
        }),
        Ok(RunEvent::TextDelta {
            value: Some("there".to_string()),
            annotations: Vec::new(),
        }),
        Ok(RunEvent::RunCompleted),
        Ok(RunEvent::Done),
    ]));
    let timer = Arc::new(CountingTimer::default());
    let coordinator = coordinator(api.clone(), timer);

    let mut transcript = Transcript::new();
    run_exchange(&coordinator, &mut transcript, "t_1", "a_1", "Hello")
        .await
        .unwrap();

    let messages = transcript.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);
    assert_eq!(messages[0].content, "Hello");
    assert_eq!(messages[1].role, ChatRole::Assistant);
    assert_eq!(messages[1].content, "Hi there");
    assert!(transcript.can_submit());
}

#[tokio::test]
async fn stream_failure_removes_dangling_placeholder() {
    let api = Arc::new(FakeApi::with_stream(vec![
        Ok(RunEvent::TextCreated),
        Err(AssistantsError::Stream("connection reset".to_string())),
    ]));
    let timer = Arc::new(CountingTimer::default());
    let coordinator = coordinator(api, timer);

    let mut transcript = Transcript::new();
    let result = run_exchange(&coordinator, &mut transcript, "t_1", "a_1", "Hello").await;

    assert!(result.is_err());
    assert_eq!(transcript.messages().len(), 1);
    assert_eq!(transcript.messages()[0].role, ChatRole::User);
    assert!(transcript.can_submit());
}

#[tokio::test]
async fn streamed_run_failure_surfaces_as_error() {
    let api = Arc::new(FakeApi::with_stream(vec![
        Ok(RunEvent::TextCreated),
        Ok(RunEvent::RunFailed {
            status: RunStatus::Expired,
            message: None,
        }),
        Ok(RunEvent::Done),
    ]));
    let timer = Arc::new(CountingTimer::default());
    let coordinator = coordinator(api, timer);

    let mut transcript = Transcript::new();
    let result = run_exchange(&coordinator, &mut transcript, "t_1", "a_1", "Hello").await;

    assert!(matches!(
        result,
        Err(ChatError::RunUnsuccessful {
            status: RunStatus::Expired,
            ..
        })
    ));
    assert_eq!(transcript.messages().len(), 1);
}
