use std::sync::Arc;

use crate::index::VectorIndex;
use crate::llm_client::{ChatModel, Embedder};
use crate::query::PromptComposer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<VectorIndex>,
    /// Embeds incoming questions. Must be the same model the index was built with.
    pub embedder: Arc<dyn Embedder>,
    pub llm: Arc<dyn ChatModel>,
    pub composer: PromptComposer,
}
