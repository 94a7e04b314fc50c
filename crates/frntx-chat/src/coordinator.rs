use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

use frntx_assistants::{AssistantsApi, MessageRole, Run, RunEventStream, ThreadMessage};

use crate::error::{ChatError, Result};
use crate::timer::{RunTimer, TokioTimer};
use crate::transcript::Transcript;

/// Tuning for the polling variant.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Fixed delay between run status checks.
    pub poll_interval: Duration,
    /// Upper bound on status checks; `None` polls until terminal.
    pub max_polls: Option<u32>,
    /// When true, a run ending failed/cancelled/expired surfaces as an
    /// error. When false, any terminal status resolves and the newest
    /// assistant message (if any) is returned regardless.
    pub fail_on_unsuccessful_run: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            max_polls: None,
            fail_on_unsuccessful_run: true,
        }
    }
}

/// Turns a user-authored text message into a persisted exchange with an
/// assistant: append the message, trigger a run, resolve the reply either
/// atomically (poll then fetch) or incrementally (event stream).
///
/// Within one submission the ordering is fixed: user-message append, then
/// run creation, then status observation, then the final message fetch.
/// Nothing orders concurrent submissions; callers gate input per thread
/// (see [`Transcript::can_submit`]).
pub struct RunCoordinator {
    api: Arc<dyn AssistantsApi>,
    timer: Arc<dyn RunTimer>,
    config: CoordinatorConfig,
}

impl RunCoordinator {
    pub fn new(api: Arc<dyn AssistantsApi>) -> Self {
        Self {
            api,
            timer: Arc::new(TokioTimer),
            config: CoordinatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_timer(mut self, timer: Arc<dyn RunTimer>) -> Self {
        self.timer = timer;
        self
    }

    /// Poll variant: append, run, poll to terminal, fetch the reply.
    ///
    /// Returns the newest assistant-role message once the run completes.
    /// No retry; failures at any step propagate to the caller, and the
    /// appended user message is deliberately left in place.
    pub async fn submit_message(
        &self,
        thread_id: &str,
        assistant_id: &str,
        text: &str,
    ) -> Result<ThreadMessage> {
        let text = non_empty(text)?;

        self.api
            .create_message(thread_id, MessageRole::User, text)
            .await?;
        let run = self.api.create_run(thread_id, assistant_id).await?;

        tracing::debug!(thread_id, run_id = %run.id, "run created, polling");
        let run = self.poll_to_terminal(thread_id, &run.id).await?;

        if self.config.fail_on_unsuccessful_run && run.status.is_failure() {
            tracing::warn!(run_id = %run.id, status = run.status.as_str(), "run unsuccessful");
            return Err(ChatError::RunUnsuccessful {
                status: run.status,
                message: run.last_error.map(|e| e.message),
            });
        }

        let messages = self.api.list_messages(thread_id).await?;
        messages
            .into_iter()
            .rev()
            .find(|message| message.role == MessageRole::Assistant)
            .ok_or(ChatError::NoAssistantReply)
    }

    /// Stream variant: append, then hand back the run's event stream.
    pub async fn stream_message(
        &self,
        thread_id: &str,
        assistant_id: &str,
        text: &str,
    ) -> Result<RunEventStream> {
        let text = non_empty(text)?;

        self.api
            .create_message(thread_id, MessageRole::User, text)
            .await?;
        Ok(self.api.stream_run(thread_id, assistant_id).await?)
    }

    /// One status check per iteration, suspending for the configured
    /// interval between checks; no check happens after a terminal status.
    async fn poll_to_terminal(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let mut checks: u32 = 0;

        loop {
            let run = self.api.retrieve_run(thread_id, run_id).await?;
            checks += 1;

            if run.status.is_terminal() {
                return Ok(run);
            }

            if let Some(max) = self.config.max_polls {
                if checks >= max {
                    return Err(ChatError::PollLimitReached);
                }
            }

            self.timer.sleep(self.config.poll_interval).await;
        }
    }
}

/// Drive one full streamed exchange against a transcript: optimistic user
/// append, event application in arrival order, placeholder cleanup on error.
pub async fn run_exchange(
    coordinator: &RunCoordinator,
    transcript: &mut Transcript,
    thread_id: &str,
    assistant_id: &str,
    text: &str,
) -> Result<()> {
    let text = non_empty(text)?;
    transcript.push_user(text);

    let mut stream = match coordinator
        .stream_message(thread_id, assistant_id, text)
        .await
    {
        Ok(stream) => stream,
        Err(e) => {
            transcript.abort();
            return Err(e);
        }
    };

    while let Some(event) = stream.next().await {
        match event {
            Ok(event) => transcript.apply(&event),
            Err(e) => {
                transcript.abort();
                return Err(e.into());
            }
        }
    }

    if let Some(failure) = transcript.failure() {
        return Err(ChatError::RunUnsuccessful {
            status: failure.status,
            message: failure.message.clone(),
        });
    }

    Ok(())
}

fn non_empty(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    Ok(trimmed)
}
