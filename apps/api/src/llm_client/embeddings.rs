//! Embedding calls against the Gemini embedding model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Content, GeminiClient, LlmError, Part};

/// Embedding model shared by index build and query time.
pub const EMBEDDING_MODEL: &str = "text-embedding-004";
/// Upper bound on requests per `batchEmbedContents` call.
pub const MAX_BATCH: usize = 100;

/// Turns text into vectors. Documents and queries are embedded with
/// different task hints, so they are separate calls.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LlmError>;

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum TaskType {
    RetrievalDocument,
    RetrievalQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: TaskType,
}

#[derive(Debug, Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<EmbedRequest<'a>>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

fn embed_request(text: &str, task_type: TaskType) -> EmbedRequest<'_> {
    EmbedRequest {
        model: format!("models/{EMBEDDING_MODEL}"),
        content: Content {
            role: None,
            parts: vec![Part { text }],
        },
        task_type,
    }
}

#[async_trait]
impl Embedder for GeminiClient {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(MAX_BATCH) {
            let request = BatchEmbedRequest {
                requests: batch
                    .iter()
                    .map(|t| embed_request(t, TaskType::RetrievalDocument))
                    .collect(),
            };
            let response: BatchEmbedResponse = self
                .post(EMBEDDING_MODEL, "batchEmbedContents", &request)
                .await?;

            if response.embeddings.len() != batch.len() {
                return Err(LlmError::EmbeddingCount {
                    expected: batch.len(),
                    actual: response.embeddings.len(),
                });
            }
            debug!(batch = batch.len(), "Embedded document batch");
            vectors.extend(response.embeddings.into_iter().map(|e| e.values));
        }

        Ok(vectors)
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let request = embed_request(text, TaskType::RetrievalQuery);
        let response: EmbedResponse = self.post(EMBEDDING_MODEL, "embedContent", &request).await?;
        Ok(response.embedding.values)
    }
}
