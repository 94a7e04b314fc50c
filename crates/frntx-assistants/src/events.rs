use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::message::ImageFileRef;
use crate::types::{Annotation, RequiredToolCall, Run, RunStatus};

/// Client-observed event emitted while a run executes.
///
/// These are decoded from the hosted API's server-sent event stream and must
/// be applied in arrival order: text deltas concatenate onto the last
/// message in sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// A new, empty assistant message has begun.
    TextCreated,

    /// Append text to the last message; annotations may rewrite it.
    TextDelta {
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        annotations: Vec<Annotation>,
    },

    /// A tool invocation (code interpreter output) has begun.
    ToolCallCreated { kind: String },

    /// Extend the current tool output.
    ToolCallDelta { input: String },

    /// A generated image is ready to embed.
    ImageFileDone { file_id: String },

    /// Terminal: the run finished and the reply is complete.
    RunCompleted,

    /// Terminal: the run stopped without a usable reply.
    RunFailed {
        status: RunStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// The assistant wants local tool results before continuing.
    /// Observed but currently unresolved by any caller.
    RequiresAction {
        run_id: String,
        tool_calls: Vec<RequiredToolCall>,
    },

    /// End of the event stream.
    Done,
}

// ============================================================================
// RAW WIRE PAYLOADS
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MessageDeltaPayload {
    #[allow(dead_code)]
    pub id: String,
    pub delta: MessageDelta,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MessageDelta {
    #[serde(default)]
    pub content: Vec<DeltaContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum DeltaContent {
    Text {
        #[serde(default)]
        text: Option<TextDeltaContent>,
    },
    ImageFile {
        #[serde(default)]
        image_file: Option<ImageFileRef>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextDeltaContent {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RunStepPayload {
    #[allow(dead_code)]
    pub id: String,
    #[serde(default)]
    pub step_details: Option<StepDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RunStepDeltaPayload {
    #[allow(dead_code)]
    pub id: String,
    pub delta: StepDelta,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StepDelta {
    #[serde(default)]
    pub step_details: Option<StepDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum StepDetails {
    ToolCalls {
        #[serde(default)]
        tool_calls: Vec<StepToolCall>,
    },
    MessageCreation {},
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum StepToolCall {
    CodeInterpreter {
        #[serde(default)]
        code_interpreter: Option<CodeInterpreterCall>,
    },
    FileSearch {},
    Function {},
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CodeInterpreterCall {
    #[serde(default)]
    pub input: Option<String>,
}

// ============================================================================
// WIRE EVENT → RunEvent MAPPING
// ============================================================================

/// Map one named SSE frame to zero or more typed events.
///
/// Unknown event names are skipped; malformed payloads of known events are
/// decode errors. Order within a frame follows the payload's content order.
pub fn decode_frame(event_name: &str, data: &str) -> Result<Vec<RunEvent>> {
    let events = match event_name {
        "thread.message.created" => vec![RunEvent::TextCreated],

        "thread.message.delta" => {
            let payload: MessageDeltaPayload = serde_json::from_str(data)?;
            let mut events = Vec::new();
            for part in payload.delta.content {
                match part {
                    DeltaContent::Text { text: Some(text) } => {
                        if text.value.is_some() || !text.annotations.is_empty() {
                            events.push(RunEvent::TextDelta {
                                value: text.value,
                                annotations: text.annotations,
                            });
                        }
                    }
                    DeltaContent::ImageFile {
                        image_file: Some(image),
                    } => {
                        events.push(RunEvent::ImageFileDone {
                            file_id: image.file_id,
                        });
                    }
                    _ => {}
                }
            }
            events
        }

        "thread.run.step.created" => {
            let payload: RunStepPayload = serde_json::from_str(data)?;
            tool_call_kinds(payload.step_details.as_ref())
                .into_iter()
                .map(|kind| RunEvent::ToolCallCreated { kind })
                .collect()
        }

        "thread.run.step.delta" => {
            let payload: RunStepDeltaPayload = serde_json::from_str(data)?;
            code_inputs(payload.delta.step_details.as_ref())
                .into_iter()
                .map(|input| RunEvent::ToolCallDelta { input })
                .collect()
        }

        "thread.run.completed" => vec![RunEvent::RunCompleted],

        "thread.run.failed" | "thread.run.cancelled" | "thread.run.expired" => {
            let run: Run = serde_json::from_str(data)?;
            vec![RunEvent::RunFailed {
                status: run.status,
                message: run.last_error.map(|e| e.message),
            }]
        }

        "thread.run.requires_action" => {
            let run: Run = serde_json::from_str(data)?;
            let tool_calls = run
                .required_action
                .map(|a| a.submit_tool_outputs.tool_calls)
                .unwrap_or_default();
            vec![RunEvent::RequiresAction {
                run_id: run.id,
                tool_calls,
            }]
        }

        "done" => vec![RunEvent::Done],

        // Other lifecycle events (run created, message completed, ...) carry
        // no information the transcript needs.
        _ => Vec::new(),
    };

    Ok(events)
}

fn tool_call_kinds(details: Option<&StepDetails>) -> Vec<String> {
    match details {
        Some(StepDetails::ToolCalls { tool_calls }) => tool_calls
            .iter()
            .map(|call| {
                match call {
                    StepToolCall::CodeInterpreter { .. } => "code_interpreter",
                    StepToolCall::FileSearch {} => "file_search",
                    StepToolCall::Function {} => "function",
                }
                .to_string()
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn code_inputs(details: Option<&StepDetails>) -> Vec<String> {
    match details {
        Some(StepDetails::ToolCalls { tool_calls }) => tool_calls
            .iter()
            .filter_map(|call| match call {
                StepToolCall::CodeInterpreter {
                    code_interpreter: Some(code),
                } => code.input.clone().filter(|input| !input.is_empty()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
