use serde::{Deserialize, Serialize};

use frntx_assistants::types::Annotation;
use frntx_assistants::{MessageRole, RunEvent, RunStatus, ThreadMessage};

/// Local, ordered view of a conversation as the UI renders it.
///
/// Only the coordinator mutates it: optimistic user appends plus inbound
/// run events applied strictly in arrival order. `awaiting_reply` is the
/// single-slot admission gate — at most one exchange in flight per thread.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
    failure: Option<RunFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    /// Code-interpreter input rendered as a code block.
    Code,
}

#[derive(Debug, Clone)]
pub struct RunFailure {
    pub status: RunStatus,
    pub message: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from hosted thread history (text parts only, oldest first).
    pub fn from_history(history: &[ThreadMessage]) -> Self {
        let messages = history
            .iter()
            .map(|message| ChatMessage {
                role: match message.role {
                    MessageRole::User => ChatRole::User,
                    MessageRole::Assistant => ChatRole::Assistant,
                },
                content: message.text(),
            })
            .collect();

        Self {
            messages,
            awaiting_reply: false,
            failure: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether the input gate is open (no exchange in flight).
    pub fn can_submit(&self) -> bool {
        !self.awaiting_reply
    }

    pub fn failure(&self) -> Option<&RunFailure> {
        self.failure.as_ref()
    }

    /// Optimistic local append; closes the input gate.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: content.into(),
        });
        self.awaiting_reply = true;
        self.failure = None;
    }

    /// Apply one run event. Events must arrive in emission order; deltas
    /// concatenate onto the last message in sequence.
    pub fn apply(&mut self, event: &RunEvent) {
        match event {
            RunEvent::TextCreated => self.push(ChatRole::Assistant),

            RunEvent::TextDelta { value, annotations } => {
                if let Some(value) = value {
                    self.append_to_last(value);
                }
                if !annotations.is_empty() {
                    self.annotate_last(annotations);
                }
            }

            RunEvent::ToolCallCreated { kind } => {
                if kind == "code_interpreter" {
                    self.push(ChatRole::Code);
                }
            }

            RunEvent::ToolCallDelta { input } => self.append_to_last(input),

            RunEvent::ImageFileDone { file_id } => {
                self.append_to_last(&format!("\n![{file_id}](/api/files/{file_id})\n"));
            }

            RunEvent::RunCompleted | RunEvent::Done => {
                self.awaiting_reply = false;
            }

            RunEvent::RunFailed { status, message } => {
                self.failure = Some(RunFailure {
                    status: *status,
                    message: message.clone(),
                });
                self.abort();
            }

            // Tool-call resolution is not wired up; the event is observed
            // and the exchange stalls until the hosted run expires.
            RunEvent::RequiresAction { run_id, .. } => {
                tracing::warn!(run_id, "run requires tool outputs; no handler is configured");
            }
        }
    }

    /// Reopen the gate and drop a dangling placeholder left by a failed or
    /// aborted exchange.
    pub fn abort(&mut self) {
        self.awaiting_reply = false;
        if let Some(last) = self.messages.last() {
            if last.role != ChatRole::User && last.content.is_empty() {
                self.messages.pop();
            }
        }
    }

    fn push(&mut self, role: ChatRole) {
        self.messages.push(ChatMessage {
            role,
            content: String::new(),
        });
    }

    fn append_to_last(&mut self, content: &str) {
        match self.messages.last_mut() {
            Some(last) => last.content.push_str(content),
            // A delta before any created event still has to land somewhere.
            None => self.messages.push(ChatMessage {
                role: ChatRole::Assistant,
                content: content.to_string(),
            }),
        }
    }

    /// Rewrite every literal occurrence of each file_path annotation's
    /// placeholder text into a download-link path. The substitution is
    /// global over the accumulated text and order-independent.
    fn annotate_last(&mut self, annotations: &[Annotation]) {
        let Some(last) = self.messages.last_mut() else {
            return;
        };

        for annotation in annotations {
            if let Annotation::FilePath {
                text, file_path, ..
            } = annotation
            {
                last.content = last
                    .content
                    .replace(text, &format!("/api/files/{}", file_path.file_id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frntx_assistants::types::message::FilePathRef;

    fn file_path_annotation(text: &str, file_id: &str) -> Annotation {
        Annotation::FilePath {
            text: text.to_string(),
            file_path: FilePathRef {
                file_id: file_id.to_string(),
            },
            start_index: None,
            end_index: None,
        }
    }

    #[test]
    fn deltas_concatenate_in_arrival_order() {
        let mut transcript = Transcript::new();
        for event in [
            RunEvent::TextCreated,
            RunEvent::TextDelta {
                value: Some("Hel".to_string()),
                annotations: Vec::new(),
            },
            RunEvent::TextDelta {
                value: Some("lo".to_string()),
                annotations: Vec::new(),
            },
            RunEvent::RunCompleted,
        ] {
            transcript.apply(&event);
        }

        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].role, ChatRole::Assistant);
        assert_eq!(transcript.messages()[0].content, "Hello");
        assert!(transcript.can_submit());
    }

    #[test]
    fn annotation_rewrite_replaces_every_occurrence() {
        let mut transcript = Transcript::new();
        transcript.apply(&RunEvent::TextCreated);
        transcript.apply(&RunEvent::TextDelta {
            value: Some("see [ref] and also [ref]".to_string()),
            annotations: Vec::new(),
        });
        transcript.apply(&RunEvent::TextDelta {
            value: None,
            annotations: vec![file_path_annotation("[ref]", "abc")],
        });

        assert_eq!(
            transcript.messages()[0].content,
            "see /api/files/abc and also /api/files/abc"
        );
    }

    #[test]
    fn annotation_rewrite_covers_text_appended_earlier() {
        // The substitution applies to the accumulated text, not just the
        // delta the annotation arrived with.
        let mut transcript = Transcript::new();
        transcript.apply(&RunEvent::TextCreated);
        transcript.apply(&RunEvent::TextDelta {
            value: Some("see [r".to_string()),
            annotations: Vec::new(),
        });
        transcript.apply(&RunEvent::TextDelta {
            value: Some("ef]".to_string()),
            annotations: vec![file_path_annotation("[ref]", "abc")],
        });

        assert_eq!(transcript.messages()[0].content, "see /api/files/abc");
    }

    #[test]
    fn code_interpreter_gets_its_own_message() {
        let mut transcript = Transcript::new();
        transcript.apply(&RunEvent::ToolCallCreated {
            kind: "code_interpreter".to_string(),
        });
        transcript.apply(&RunEvent::ToolCallDelta {
            input: "print(1)".to_string(),
        });

        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].role, ChatRole::Code);
        assert_eq!(transcript.messages()[0].content, "print(1)");
    }

    #[test]
    fn non_code_tool_calls_are_ignored() {
        let mut transcript = Transcript::new();
        transcript.apply(&RunEvent::ToolCallCreated {
            kind: "file_search".to_string(),
        });
        assert!(transcript.messages().is_empty());
    }

    #[test]
    fn image_file_embeds_a_download_link() {
        let mut transcript = Transcript::new();
        transcript.apply(&RunEvent::TextCreated);
        transcript.apply(&RunEvent::ImageFileDone {
            file_id: "file-img".to_string(),
        });

        assert_eq!(
            transcript.messages()[0].content,
            "\n![file-img](/api/files/file-img)\n"
        );
    }

    #[test]
    fn failed_run_drops_dangling_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push_user("hello");
        transcript.apply(&RunEvent::TextCreated);
        transcript.apply(&RunEvent::RunFailed {
            status: RunStatus::Failed,
            message: Some("boom".to_string()),
        });

        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].role, ChatRole::User);
        assert!(transcript.can_submit());
        assert!(transcript.failure().is_some());
    }

    #[test]
    fn input_gate_closes_until_completion() {
        let mut transcript = Transcript::new();
        assert!(transcript.can_submit());

        transcript.push_user("hello");
        assert!(!transcript.can_submit());

        transcript.apply(&RunEvent::TextCreated);
        transcript.apply(&RunEvent::RunCompleted);
        assert!(transcript.can_submit());
    }

    #[test]
    fn history_seeding_keeps_roles_and_order() {
        let history: Vec<ThreadMessage> = serde_json::from_str(
            r#"[
                {"id":"m1","role":"user","created_at":1,
                 "content":[{"type":"text","text":{"value":"Hello"}}]},
                {"id":"m2","role":"assistant","created_at":2,
                 "content":[{"type":"text","text":{"value":"Hi there"}}]}
            ]"#,
        )
        .unwrap();

        let transcript = Transcript::from_history(&history);
        assert_eq!(transcript.messages().len(), 2);
        assert_eq!(transcript.messages()[0].role, ChatRole::User);
        assert_eq!(transcript.messages()[0].content, "Hello");
        assert_eq!(transcript.messages()[1].role, ChatRole::Assistant);
        assert_eq!(transcript.messages()[1].content, "Hi there");
    }
}
