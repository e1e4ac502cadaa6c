//! Template registry handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::templates::{self, Template};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTemplate {
    pub template_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTemplate {
    pub template_id: String,
}

pub async fn list_templates() -> Json<Vec<Template>> {
    Json(templates::list_templates().to_vec())
}

/// Selects a template for the preview. Unknown ids resolve to the registry
/// default rather than failing, so a stale client selection is self-healing.
pub async fn select_template(
    State(state): State<AppState>,
    Json(body): Json<SelectTemplate>,
) -> Json<SelectedTemplate> {
    let template = state.controller.select_template(&body.template_id);
    Json(SelectedTemplate {
        template_id: template.id.to_string(),
    })
}
