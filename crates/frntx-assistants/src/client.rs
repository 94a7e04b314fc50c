// Hosted Assistants API client (HTTP direct, no SDK)

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart;
use serde::Deserialize;

use crate::error::{AssistantsError, Result};
use crate::streaming::{parse_run_event_stream, RunEventStream};
use crate::traits::AssistantsApi;
use crate::types::{
    Assistant, CreateAssistant, MessageRole, ModelInfo, Run, StoredFile, ThreadMessage,
    ThreadObject, ToolOutput, UpdateAssistant, VectorStore, VectorStoreFile,
};

const API_BASE: &str = "https://api.openai.com/v1";
const BETA_HEADER: &str = "assistants=v2";

pub struct HostedAssistantsClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HostedAssistantsClient {
    /// Create a new client with an API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE)
    }

    /// Create a client against a non-default base URL (proxies, test servers).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| AssistantsError::InvalidApiKey)?,
        );
        headers.insert("OpenAI-Beta", HeaderValue::from_static(BETA_HEADER));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Surface non-2xx responses as API errors with the body text attached.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(AssistantsError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T> {
        let response = self.http_client.get(self.url(path)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let response = self
            .http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self.http_client.delete(self.url(path)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Paginated list envelope used by every list endpoint.
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

#[async_trait]
impl AssistantsApi for HostedAssistantsClient {
    async fn create_assistant(&self, req: CreateAssistant) -> Result<Assistant> {
        self.post_json("/assistants", &serde_json::to_value(&req)?)
            .await
    }

    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        let list: ListResponse<Assistant> = self.get_json("/assistants").await?;
        Ok(list.data)
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.get_json(&format!("/assistants/{assistant_id}")).await
    }

    async fn update_assistant(
        &self,
        assistant_id: &str,
        req: UpdateAssistant,
    ) -> Result<Assistant> {
        self.post_json(
            &format!("/assistants/{assistant_id}"),
            &serde_json::to_value(&req)?,
        )
        .await
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<()> {
        self.delete(&format!("/assistants/{assistant_id}")).await
    }

    async fn create_thread(&self) -> Result<ThreadObject> {
        self.post_json("/threads", &serde_json::json!({})).await
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<ThreadObject> {
        self.get_json(&format!("/threads/{thread_id}")).await
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        self.delete(&format!("/threads/{thread_id}")).await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage> {
        self.post_json(
            &format!("/threads/{thread_id}/messages"),
            &serde_json::json!({
                "role": role,
                "content": content,
            }),
        )
        .await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let list: ListResponse<ThreadMessage> = self
            .get_json(&format!("/threads/{thread_id}/messages?order=asc"))
            .await?;
        Ok(list.data)
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        self.post_json(
            &format!("/threads/{thread_id}/runs"),
            &serde_json::json!({ "assistant_id": assistant_id }),
        )
        .await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get_json(&format!("/threads/{thread_id}/runs/{run_id}"))
            .await
    }

    async fn stream_run(&self, thread_id: &str, assistant_id: &str) -> Result<RunEventStream> {
        let response = self
            .http_client
            .post(self.url(&format!("/threads/{thread_id}/runs")))
            .json(&serde_json::json!({
                "assistant_id": assistant_id,
                "stream": true,
            }))
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(parse_run_event_stream(response))
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> Result<RunEventStream> {
        let response = self
            .http_client
            .post(self.url(&format!(
                "/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"
            )))
            .json(&serde_json::json!({
                "tool_outputs": outputs,
                "stream": true,
            }))
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(parse_run_event_stream(response))
    }

    async fn create_vector_store(&self, name: &str) -> Result<VectorStore> {
        self.post_json("/vector_stores", &serde_json::json!({ "name": name }))
            .await
    }

    async fn update_vector_store(&self, store_id: &str, name: &str) -> Result<VectorStore> {
        self.post_json(
            &format!("/vector_stores/{store_id}"),
            &serde_json::json!({ "name": name }),
        )
        .await
    }

    async fn list_vector_stores(&self) -> Result<Vec<VectorStore>> {
        let list: ListResponse<VectorStore> = self.get_json("/vector_stores").await?;
        Ok(list.data)
    }

    async fn create_vector_store_file(
        &self,
        store_id: &str,
        file_id: &str,
    ) -> Result<VectorStoreFile> {
        self.post_json(
            &format!("/vector_stores/{store_id}/files"),
            &serde_json::json!({ "file_id": file_id }),
        )
        .await
    }

    async fn list_vector_store_files(&self, store_id: &str) -> Result<Vec<VectorStoreFile>> {
        let list: ListResponse<VectorStoreFile> = self
            .get_json(&format!("/vector_stores/{store_id}/files"))
            .await?;
        Ok(list.data)
    }

    async fn retrieve_vector_store_file(
        &self,
        store_id: &str,
        file_id: &str,
    ) -> Result<VectorStoreFile> {
        self.get_json(&format!("/vector_stores/{store_id}/files/{file_id}"))
            .await
    }

    async fn delete_vector_store_file(&self, store_id: &str, file_id: &str) -> Result<()> {
        self.delete(&format!("/vector_stores/{store_id}/files/{file_id}"))
            .await
    }

    async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<StoredFile> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let response = self
            .http_client
            .post(self.url("/files"))
            .multipart(form)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_files(&self) -> Result<Vec<StoredFile>> {
        let list: ListResponse<StoredFile> = self.get_json("/files").await?;
        Ok(list.data)
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<StoredFile> {
        self.get_json(&format!("/files/{file_id}")).await
    }

    async fn file_content(&self, file_id: &str) -> Result<Bytes> {
        let response = self
            .http_client
            .get(self.url(&format!("/files/{file_id}/content")))
            .send()
            .await?;
        Ok(Self::check(response).await?.bytes().await?)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let list: ListResponse<ModelInfo> = self.get_json("/models").await?;
        Ok(list.data)
    }
}
