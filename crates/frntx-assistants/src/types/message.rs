use serde::{Deserialize, Serialize};

/// Message stored on a hosted thread.
///
/// Content is an ordered sequence of tagged parts; for assistant replies the
/// parts are completed server-side, for user input they are created whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: Vec<MessageContent>,
    pub created_at: i64,
}

impl ThreadMessage {
    /// Concatenated text of all text parts.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                MessageContent::Text { text } => Some(text.value.as_str()),
                MessageContent::ImageFile { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Tagged content part, validated at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    ImageFile { image_file: ImageFileRef },
}

impl MessageContent {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            text: TextContent {
                value: value.into(),
                annotations: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFileRef {
    pub file_id: String,
}

/// Inline annotation attached to a text part. `FilePath` annotations carry a
/// placeholder (`text`) that the transcript rewrites into a download link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    FilePath {
        text: String,
        file_path: FilePathRef,
        #[serde(skip_serializing_if = "Option::is_none")]
        start_index: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_index: Option<u32>,
    },
    FileCitation {
        text: String,
        file_citation: FileCitationRef,
        #[serde(skip_serializing_if = "Option::is_none")]
        start_index: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_index: Option<u32>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePathRef {
    pub file_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCitationRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}
