//! In-memory vector index over résumé chunks.
//!
//! Built once at startup from the ingested chunks and shared read-only
//! behind an `Arc`. Nothing is persisted; a restart re-embeds the PDF.

use thiserror::Error;
use tracing::info;

use crate::ingest::Chunk;
use crate::llm_client::{Embedder, LlmError};

/// Number of chunks handed to the prompt per question.
pub const RETRIEVAL_K: usize = 3;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot build an index from zero chunks")]
    Empty,

    #[error("embedding request failed: {0}")]
    Embedding(#[from] LlmError),

    #[error("embedder returned {actual} vectors for {expected} chunks")]
    CountMismatch { expected: usize, actual: usize },

    #[error("vector has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Debug)]
struct Entry {
    vector: Vec<f32>,
    chunk: Chunk,
}

#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<Entry>,
    dimensions: usize,
}

impl VectorIndex {
    /// Embeds every chunk and stores `(vector, chunk)` pairs in document order.
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self, IndexError> {
        if chunks.is_empty() {
            return Err(IndexError::Empty);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed_documents(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(IndexError::CountMismatch {
                expected: chunks.len(),
                actual: vectors.len(),
            });
        }

        let dimensions = vectors[0].len();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimensions || v.is_empty()) {
            return Err(IndexError::DimensionMismatch {
                expected: dimensions,
                actual: bad.len(),
            });
        }

        let entries: Vec<Entry> = vectors
            .into_iter()
            .zip(chunks)
            .map(|(vector, chunk)| Entry { vector, chunk })
            .collect();

        info!(chunks = entries.len(), dimensions, "Vector index ready");
        Ok(Self {
            entries,
            dimensions,
        })
    }

    /// Returns up to `k` chunks ranked by descending cosine similarity.
    /// Equal scores keep document order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<&Chunk>, IndexError> {
        if query.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(f32, &Chunk)> = self
            .entries
            .iter()
            .map(|e| (cosine_similarity(query, &e.vector), &e.chunk))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored.into_iter().take(k).map(|(_, chunk)| chunk).collect())
    }
}

/// Embeds `query` and returns the `k` nearest chunks.
pub async fn retrieve<'a>(
    index: &'a VectorIndex,
    embedder: &dyn Embedder,
    query: &str,
    k: usize,
) -> Result<Vec<&'a Chunk>, IndexError> {
    let vector = embedder.embed_query(query).await?;
    index.search(&vector, k)
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
