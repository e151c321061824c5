//! Question answering handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;
use edurag_common::{
    errors::{AppError, Result},
    Outcome,
};

/// Ask request
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

/// Ask response.
///
/// Always sent with HTTP 200; `status` tells callers which terminal state
/// the run reached and `error` is only set when it failed.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Outcome> for AskResponse {
    fn from(outcome: &Outcome) -> Self {
        Self {
            answer: outcome.answer().to_string(),
            status: outcome.status().to_string(),
            error: outcome.error().map(str::to_string),
        }
    }
}

/// Answer a question from the indexed notes
pub async fn ask(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidRequest {
        message: rejection.body_text(),
    })?;

    let outcome = state.pipeline.answer(&request.query).await;

    if let Some(error) = outcome.error() {
        tracing::warn!(error = %error, "Answering failed, returning advisory answer");
    }

    Ok(Json(AskResponse::from(&outcome)))
}
