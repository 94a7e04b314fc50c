use futures::{Stream, StreamExt};
use reqwest::Response;
use std::collections::VecDeque;
use std::pin::Pin;

use crate::error::{AssistantsError, Result};
use crate::events::{decode_frame, RunEvent};

/// Lazy, finite, non-restartable sequence of run events.
pub type RunEventStream = Pin<Box<dyn Stream<Item = Result<RunEvent>> + Send>>;

/// Incremental line buffer for SSE payloads.
///
/// Chunk boundaries can fall anywhere, including inside a UTF-8 sequence, so
/// bytes accumulate until a full line is available.
pub struct LineBuffer {
    buffer: VecDeque<u8>,
}

impl LineBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Next complete line, trimmed, or None until one arrives.
    pub fn next_line(&mut self) -> Option<Result<String>> {
        let newline_pos = self.buffer.iter().position(|&b| b == b'\n')?;
        let line_bytes: Vec<u8> = self.buffer.drain(..=newline_pos).collect();

        match std::str::from_utf8(&line_bytes) {
            Ok(line) => Some(Ok(line.trim().to_string())),
            Err(e) => Some(Err(AssistantsError::Stream(format!("invalid UTF-8: {e}")))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Pairs `event:` names with their `data:` payloads and decodes them.
///
/// The hosted stream interleaves named frames (`event: thread.message.delta`
/// followed by a `data:` line); the name applies to the next data line only.
#[derive(Default)]
pub struct RunEventDecoder {
    event_name: Option<String>,
}

impl RunEventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one trimmed line; returns the events it completes, in order.
    pub fn feed_line(&mut self, line: &str) -> Result<Vec<RunEvent>> {
        if line.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(name) = line.strip_prefix("event: ") {
            self.event_name = Some(name.to_string());
            return Ok(Vec::new());
        }

        if let Some(data) = line.strip_prefix("data: ") {
            if data == "[DONE]" {
                self.event_name = None;
                return Ok(vec![RunEvent::Done]);
            }

            // A data line without a preceding event name carries nothing we
            // can dispatch on; skip it rather than guess.
            let Some(name) = self.event_name.take() else {
                return Ok(Vec::new());
            };

            return decode_frame(&name, data);
        }

        Ok(Vec::new())
    }
}

/// Decode a chunked HTTP response into typed run events.
///
/// Events are yielded strictly in wire order; the stream ends after a
/// terminal `Done` or when the transport closes.
pub fn parse_run_event_stream(response: Response) -> RunEventStream {
    let byte_stream = response.bytes_stream();

    Box::pin(async_stream::stream! {
        let mut chunks = Box::pin(byte_stream);
        let mut buffer = LineBuffer::with_capacity(8192);
        let mut decoder = RunEventDecoder::new();

        'outer: while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    buffer.extend(&bytes);

                    while let Some(line) = buffer.next_line() {
                        match line {
                            Ok(line) => match decoder.feed_line(&line) {
                                Ok(events) => {
                                    for event in events {
                                        let done = matches!(event, RunEvent::Done);
                                        yield Ok(event);
                                        if done {
                                            break 'outer;
                                        }
                                    }
                                }
                                Err(e) => yield Err(e),
                            },
                            Err(e) => yield Err(e),
                        }
                    }
                }
                Err(e) => {
                    yield Err(AssistantsError::Stream(e.to_string()));
                    break;
                }
            }
        }
    })
}
