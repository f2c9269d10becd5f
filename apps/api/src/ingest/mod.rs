//! Résumé ingestion: PDF text extraction and chunking.

pub mod splitter;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::ingest::splitter::TextSplitter;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("resume file not found: {0}")]
    NotFound(PathBuf),

    #[error("resume file is not readable: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("failed to parse PDF: {0}")]
    Parse(String),

    #[error("no text could be extracted from the resume")]
    EmptyDocument,
}

/// A contiguous span of résumé text. Created once at startup, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Position in document order.
    pub index: usize,
    /// 1-based page the text was extracted from.
    pub page: u32,
    pub text: String,
}

/// Loads the résumé PDF at `path` and splits it into overlapping chunks.
///
/// Any failure here is fatal to startup; there is no retry.
pub async fn load_resume(path: &Path) -> Result<Vec<Chunk>, IngestError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(IngestError::NotFound(path.to_path_buf()));
    }

    let bytes = tokio::fs::read(path).await?;
    info!(path = %path.display(), bytes = bytes.len(), "Read resume PDF");

    // pdf-extract is synchronous and can panic on malformed input; a panic
    // surfaces as a JoinError here.
    let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
        .await
        .map_err(|e| IngestError::Parse(format!("PDF parser aborted: {e}")))?
        .map_err(|e| IngestError::Parse(e.to_string()))?;

    debug!(pages = pages.len(), "Extracted PDF text");
    chunk_pages(&pages, &TextSplitter::default())
}

/// Splits each page separately so every chunk keeps its page number.
pub fn chunk_pages<S: AsRef<str>>(
    pages: &[S],
    splitter: &TextSplitter,
) -> Result<Vec<Chunk>, IngestError> {
    let chunks: Vec<Chunk> = pages
        .iter()
        .enumerate()
        .flat_map(|(page_idx, page)| {
            splitter
                .split_text(page.as_ref())
                .into_iter()
                .map(move |text| (page_idx as u32 + 1, text))
        })
        .enumerate()
        .map(|(index, (page, text))| Chunk { index, page, text })
        .collect();

    if chunks.is_empty() {
        return Err(IngestError::EmptyDocument);
    }
    Ok(chunks)
}
