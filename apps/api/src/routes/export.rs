//! Export and preview handlers.
//!
//! The PDF path runs the export pipeline on a blocking thread (rasterization
//! can take seconds at high scale). The TXT path bypasses the pipeline. The
//! print path just hands the rendered region to the host — whatever the
//! client does with it is out of our hands.

use anyhow::anyhow;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::AppError;
use crate::export::{txt, ExportArtifact, PdfExportOptions};
use crate::state::AppState;
use crate::templates;

pub async fn export_pdf(
    State(state): State<AppState>,
    Json(options): Json<PdfExportOptions>,
) -> Result<Response, AppError> {
    let (doc, template_id) = state.controller.snapshot();
    let template = templates::resolve(&template_id);
    let exports = state.exports.clone();

    let artifact = tokio::task::spawn_blocking(move || exports.export_pdf(&doc, template, &options))
        .await
        .map_err(|e| AppError::Internal(anyhow!("export task panicked: {e}")))??;

    Ok(download_response(artifact))
}

pub async fn export_txt(State(state): State<AppState>) -> Response {
    let (doc, _) = state.controller.snapshot();
    download_response(txt::export_txt(&doc))
}

/// Returns the rendered preview page for the host's native print facility.
pub async fn export_print(State(state): State<AppState>) -> Response {
    let (doc, template_id) = state.controller.snapshot();
    let template = templates::resolve(&template_id);
    let page = (template.render)(&doc);
    ([(header::CONTENT_TYPE, "image/svg+xml")], page.svg).into_response()
}

/// The live preview pane: same rendering as print, fetched on every edit.
pub async fn preview(State(state): State<AppState>) -> Response {
    export_print(State(state)).await
}

fn download_response(artifact: ExportArtifact) -> Response {
    (
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.filename),
            ),
        ],
        artifact.bytes,
    )
        .into_response()
}
