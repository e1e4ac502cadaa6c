//! Document edit handlers. Each handler applies exactly one pure operation
//! through the controller and returns the resulting document.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{ops, ListName, ResumeDocument};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeState {
    pub resume: ResumeDocument,
    pub template_id: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldEdit {
    pub path: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemFieldEdit {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillEdit {
    pub value: String,
}

pub async fn get_resume(State(state): State<AppState>) -> Json<ResumeState> {
    let (resume, template_id) = state.controller.snapshot();
    Json(ResumeState { resume, template_id })
}

pub async fn replace_resume(
    State(state): State<AppState>,
    Json(doc): Json<ResumeDocument>,
) -> Result<Json<ResumeDocument>, AppError> {
    Ok(Json(state.controller.replace_document(doc)?))
}

pub async fn patch_field(
    State(state): State<AppState>,
    Json(edit): Json<FieldEdit>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state
        .controller
        .edit(|doc| ops::with_field(doc, &edit.path, &edit.value))?;
    Ok(Json(doc))
}

pub async fn append_item(
    State(state): State<AppState>,
    Path(list): Path<String>,
) -> Result<Json<ResumeDocument>, AppError> {
    let list = ListName::parse(&list)?;
    let doc = state.controller.edit(|doc| Ok(ops::append_list_item(doc, list)))?;
    Ok(Json(doc))
}

pub async fn patch_item(
    State(state): State<AppState>,
    Path((list, index)): Path<(String, usize)>,
    Json(edit): Json<ItemFieldEdit>,
) -> Result<Json<ResumeDocument>, AppError> {
    let list = ListName::parse(&list)?;
    let doc = state
        .controller
        .edit(|doc| ops::with_list_item_field(doc, list, index, &edit.field, &edit.value))?;
    Ok(Json(doc))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((list, index)): Path<(String, usize)>,
) -> Result<Json<ResumeDocument>, AppError> {
    let list = ListName::parse(&list)?;
    let doc = state.controller.edit(|doc| ops::remove_list_item(doc, list, index))?;
    Ok(Json(doc))
}

pub async fn append_skill(State(state): State<AppState>) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state.controller.edit(|doc| Ok(ops::append_skill(doc)))?;
    Ok(Json(doc))
}

pub async fn patch_skill(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(edit): Json<SkillEdit>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state.controller.edit(|doc| ops::set_skill(doc, index, &edit.value))?;
    Ok(Json(doc))
}

pub async fn delete_skill(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state.controller.edit(|doc| ops::remove_skill(doc, index))?;
    Ok(Json(doc))
}
