pub mod ai;
pub mod export;
pub mod health;
pub mod resume;
pub mod templates;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route("/api/v1/resume", get(resume::get_resume))
        .route("/api/v1/resume", put(resume::replace_resume))
        .route("/api/v1/resume/field", patch(resume::patch_field))
        .route("/api/v1/resume/:list/items", post(resume::append_item))
        .route("/api/v1/resume/:list/items/:index", patch(resume::patch_item))
        .route("/api/v1/resume/:list/items/:index", delete(resume::delete_item))
        .route("/api/v1/resume/skills", post(resume::append_skill))
        .route("/api/v1/resume/skills/:index", patch(resume::patch_skill))
        .route("/api/v1/resume/skills/:index", delete(resume::delete_skill))
        // Templates & preview
        .route("/api/v1/templates", get(templates::list_templates))
        .route("/api/v1/template", put(templates::select_template))
        .route("/api/v1/preview", get(export::preview))
        // Exports
        .route("/api/v1/export/pdf", post(export::export_pdf))
        .route("/api/v1/export/txt", get(export::export_txt))
        .route("/api/v1/export/print", get(export::export_print))
        // AI assistant
        .route("/api/v1/ai/suggest", post(ai::suggest))
        .route("/api/v1/ai/generate", post(ai::generate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::ai::{AiAssist, GenerateDraftOutput, SuggestImprovementsOutput};
    use crate::config::{Config, SeedMode};
    use crate::controller::Controller;
    use crate::errors::AppError;
    use crate::export::ExportPipeline;
    use crate::store::DocumentStore;

    /// Canned assistant that echoes its inputs back, so tests can assert the
    /// handlers pass the right content through.
    struct EchoAssist;

    #[async_trait]
    impl AiAssist for EchoAssist {
        async fn suggest_improvements(
            &self,
            resume_content: &str,
            job_description: &str,
        ) -> Result<SuggestImprovementsOutput, AppError> {
            Ok(SuggestImprovementsOutput {
                improved_content: resume_content.to_string(),
                suggestions: vec![job_description.to_string()],
            })
        }

        async fn generate_draft(
            &self,
            job_description: &str,
        ) -> Result<GenerateDraftOutput, AppError> {
            Ok(GenerateDraftOutput {
                resume_draft: format!("draft for {job_description}"),
            })
        }
    }

    fn make_app(dir: &TempDir, seed: SeedMode) -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            data_dir: dir.path().to_path_buf(),
            anthropic_api_key: None,
            seed_mode: seed,
        };
        let store = DocumentStore::open(dir.path()).unwrap();
        let state = AppState {
            controller: Arc::new(Controller::restore_or_seed(store, seed)),
            exports: Arc::new(ExportPipeline::new()),
            ai: Arc::new(EchoAssist),
            config,
        };
        build_router(state)
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).to_string(),
            ))
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let dir = TempDir::new().unwrap();
        let (status, body) = send(make_app(&dir, SeedMode::Empty), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_resume_returns_document_and_template() {
        let dir = TempDir::new().unwrap();
        let (status, body) =
            send(make_app(&dir, SeedMode::Empty), Method::GET, "/api/v1/resume", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["templateId"], "avant-garde");
        assert_eq!(body["resume"]["skills"], json!([""]));
    }

    #[tokio::test]
    async fn test_patch_field_updates_name() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir, SeedMode::Empty);
        let (status, body) = send(
            app,
            Method::PATCH,
            "/api/v1/resume/field",
            Some(json!({"path": "personalInfo.name", "value": "Jane Doe"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["personalInfo"]["name"], "Jane Doe");
    }

    #[tokio::test]
    async fn test_patch_field_rejects_unknown_path() {
        let dir = TempDir::new().unwrap();
        let (status, body) = send(
            make_app(&dir, SeedMode::Empty),
            Method::PATCH,
            "/api/v1/resume/field",
            Some(json!({"path": "personalInfo.favoriteColor", "value": "red"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PATH");
    }

    #[tokio::test]
    async fn test_item_lifecycle_append_edit_delete() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir, SeedMode::Empty);

        let (status, body) =
            send(app.clone(), Method::POST, "/api/v1/resume/experience/items", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"].as_array().unwrap().len(), 2);

        let (status, body) = send(
            app.clone(),
            Method::PATCH,
            "/api/v1/resume/experience/items/1",
            Some(json!({"field": "jobTitle", "value": "Engineer"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"][1]["jobTitle"], "Engineer");

        let (status, body) =
            send(app, Method::DELETE, "/api/v1/resume/experience/items/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_item_edit_out_of_range() {
        let dir = TempDir::new().unwrap();
        let (status, body) = send(
            make_app(&dir, SeedMode::Empty),
            Method::PATCH,
            "/api/v1/resume/education/items/5",
            Some(json!({"field": "degree", "value": "BSc"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INDEX_OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn test_unknown_list_name_rejected() {
        let dir = TempDir::new().unwrap();
        let (status, body) = send(
            make_app(&dir, SeedMode::Empty),
            Method::POST,
            "/api/v1/resume/awards/items",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_skill_lifecycle() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir, SeedMode::Empty);

        let (_, body) = send(app.clone(), Method::POST, "/api/v1/resume/skills", None).await;
        assert_eq!(body["skills"].as_array().unwrap().len(), 2);

        let (_, body) = send(
            app.clone(),
            Method::PATCH,
            "/api/v1/resume/skills/1",
            Some(json!({"value": "Rust"})),
        )
        .await;
        assert_eq!(body["skills"][1], "Rust");

        let (_, body) = send(app, Method::DELETE, "/api/v1/resume/skills/0", None).await;
        assert_eq!(body["skills"], json!(["Rust"]));
    }

    #[tokio::test]
    async fn test_list_templates_returns_all_five() {
        let dir = TempDir::new().unwrap();
        let (status, body) =
            send(make_app(&dir, SeedMode::Empty), Method::GET, "/api/v1/templates", None).await;
        assert_eq!(status, StatusCode::OK);
        let templates = body.as_array().unwrap();
        assert_eq!(templates.len(), 5);
        assert_eq!(templates[0]["id"], "avant-garde");
    }

    #[tokio::test]
    async fn test_select_template_resolves_unknown_to_default() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir, SeedMode::Empty);
        let (status, body) = send(
            app.clone(),
            Method::PUT,
            "/api/v1/template",
            Some(json!({"templateId": "elegant-script"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["templateId"], "elegant-script");

        let (_, body) = send(
            app,
            Method::PUT,
            "/api/v1/template",
            Some(json!({"templateId": "nope"})),
        )
        .await;
        assert_eq!(body["templateId"], "avant-garde");
    }

    #[tokio::test]
    async fn test_txt_export_sets_download_headers() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir, SeedMode::Sample);
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/v1/export/txt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\""));
        assert!(disposition.ends_with(".txt\""));
    }

    #[tokio::test]
    async fn test_preview_returns_svg() {
        let dir = TempDir::new().unwrap();
        let response = make_app(&dir, SeedMode::Sample)
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/v1/preview")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("<svg"));
    }

    #[tokio::test]
    async fn test_ai_suggest_passes_serialized_resume() {
        let dir = TempDir::new().unwrap();
        let (status, body) = send(
            make_app(&dir, SeedMode::Sample),
            Method::POST,
            "/api/v1/ai/suggest",
            Some(json!({"jobDescription": "Senior Rust engineer"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["improvedContent"].as_str().unwrap().contains("Name:"));
        assert_eq!(body["suggestions"][0], "Senior Rust engineer");
    }

    #[tokio::test]
    async fn test_ai_suggest_requires_job_description() {
        let dir = TempDir::new().unwrap();
        let (status, body) = send(
            make_app(&dir, SeedMode::Empty),
            Method::POST,
            "/api/v1/ai/suggest",
            Some(json!({"jobDescription": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ai_generate_returns_draft() {
        let dir = TempDir::new().unwrap();
        let (status, body) = send(
            make_app(&dir, SeedMode::Empty),
            Method::POST,
            "/api/v1/ai/generate",
            Some(json!({"jobDescription": "Backend role"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resumeDraft"], "draft for Backend role");
    }
}
