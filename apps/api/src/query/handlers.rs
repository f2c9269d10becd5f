use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::query::answer_question;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Missing input is treated as an empty question; no other validation.
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub response: String,
}

/// POST /query
///
/// Body decoding failures are reported in the same `{"error"}` shape as
/// retrieval or generation failures.
pub async fn handle_query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let response = answer_question(&state, &request.input).await?;

    Ok(Json(QueryResponse { response }))
}
