//! AI assistant handlers. Both are single-attempt: a failure surfaces as an
//! AI_REQUEST_ERROR and the user resubmits manually.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::ai::{GenerateDraftOutput, SuggestImprovementsOutput};
use crate::errors::AppError;
use crate::models::text::serialize_for_ai;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistRequest {
    pub job_description: String,
}

pub async fn suggest(
    State(state): State<AppState>,
    Json(body): Json<AssistRequest>,
) -> Result<Json<SuggestImprovementsOutput>, AppError> {
    if body.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "A job description is required to get AI suggestions".to_string(),
        ));
    }
    let (doc, _) = state.controller.snapshot();
    let resume_content = serialize_for_ai(&doc);
    let output = state
        .ai
        .suggest_improvements(&resume_content, &body.job_description)
        .await?;
    Ok(Json(output))
}

pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<AssistRequest>,
) -> Result<Json<GenerateDraftOutput>, AppError> {
    if body.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "A job description is required to generate a draft".to_string(),
        ));
    }
    Ok(Json(state.ai.generate_draft(&body.job_description).await?))
}
