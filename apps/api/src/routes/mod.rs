pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::query::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/query", post(handlers::handle_query))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::index::tests::{resume_chunks, KeywordEmbedder};
    use crate::index::VectorIndex;
    use crate::llm_client::{ChatModel, Embedder, LlmError};
    use crate::query::PromptComposer;

    /// Echoes a canned answer and records every prompt it was given.
    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("He has worked on a vector search engine in Rust.".to_string())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 429,
                message: "Resource has been exhausted".to_string(),
            })
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed_documents(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
            Err(LlmError::EmptyContent)
        }

        async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
            Err(LlmError::Api {
                status: 403,
                message: "API key not valid.".to_string(),
            })
        }
    }

    async fn test_state(embedder: Arc<dyn Embedder>, llm: Arc<dyn ChatModel>) -> AppState {
        let index = VectorIndex::build(resume_chunks(), &KeywordEmbedder)
            .await
            .unwrap();
        AppState {
            index: Arc::new(index),
            embedder,
            llm,
            composer: PromptComposer::new("Jordan"),
        }
    }

    async fn post_query(app: Router, body: &str, content_type: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/query")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_returns_liveness_message() {
        let state = test_state(Arc::new(KeywordEmbedder), Arc::new(RecordingModel::default())).await;
        let response = build_router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].as_str().unwrap().contains("running"));
    }

    #[tokio::test]
    async fn test_query_returns_response_and_grounds_prompt() {
        let model = Arc::new(RecordingModel::default());
        let state = test_state(Arc::new(KeywordEmbedder), model.clone()).await;

        let (status, body) = post_query(
            build_router(state),
            r#"{"input": "What projects has he worked on?"}"#,
            "application/json",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            "He has worked on a vector search engine in Rust."
        );
        assert!(body.get("error").is_none());

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("User Question:\nWhat projects has he worked on?"));
        assert!(prompts[0].contains("a vector search engine in Rust"));
        assert!(prompts[0].contains("Jordan's resume"));
    }

    #[tokio::test]
    async fn test_prompt_carries_at_most_three_chunks() {
        let model = Arc::new(RecordingModel::default());
        let state = test_state(Arc::new(KeywordEmbedder), model.clone()).await;

        post_query(
            build_router(state),
            r#"{"input": "Rust project degree python kafka"}"#,
            "application/json",
        )
        .await;

        let prompts = model.prompts.lock().unwrap();
        let included = resume_chunks()
            .iter()
            .filter(|c| prompts[0].contains(c.text.as_str()))
            .count();
        assert_eq!(included, 3);
    }

    #[tokio::test]
    async fn test_missing_input_defaults_to_empty_question() {
        let model = Arc::new(RecordingModel::default());
        let state = test_state(Arc::new(KeywordEmbedder), model.clone()).await;

        let (status, body) = post_query(build_router(state), "{}", "application/json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("response").is_some());
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("User Question:\n\n\nAnswer:"));
    }

    #[tokio::test]
    async fn test_generation_failure_becomes_error_body() {
        let state = test_state(Arc::new(KeywordEmbedder), Arc::new(FailingModel)).await;

        let (status, body) = post_query(
            build_router(state),
            r#"{"input": "What are his skills?"}"#,
            "application/json",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("response").is_none());
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Generation error"));
        assert!(error.contains("Resource has been exhausted"));
    }

    #[tokio::test]
    async fn test_embedding_failure_becomes_error_body() {
        let model = Arc::new(RecordingModel::default());
        let state = test_state(Arc::new(FailingEmbedder), model.clone()).await;

        let (status, body) = post_query(
            build_router(state),
            r#"{"input": "Where did he study?"}"#,
            "application/json",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().starts_with("Retrieval error"));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_becomes_error_body() {
        let state = test_state(Arc::new(KeywordEmbedder), Arc::new(RecordingModel::default())).await;

        let (status, body) =
            post_query(build_router(state), r#"{"input": "#, "application/json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
    }

    #[tokio::test]
    async fn test_missing_content_type_becomes_error_body() {
        let state = test_state(Arc::new(KeywordEmbedder), Arc::new(RecordingModel::default())).await;

        let (status, body) =
            post_query(build_router(state), r#"{"input": "hi"}"#, "text/plain").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("error").is_some());
        assert!(body.get("response").is_none());
    }

    #[tokio::test]
    async fn test_repeated_queries_see_identical_context() {
        let model = Arc::new(RecordingModel::default());
        let state = test_state(Arc::new(KeywordEmbedder), model.clone()).await;
        let app = build_router(state);

        for _ in 0..2 {
            post_query(
                app.clone(),
                r#"{"input": "Tell me about his degree"}"#,
                "application/json",
            )
            .await;
        }

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], prompts[1]);
    }
}
