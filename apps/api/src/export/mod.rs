//! Export pipeline — turns the rendered preview into a downloadable artifact.
//!
//! One PDF export moves through Idle → Preparing → Rendering → Composing →
//! Done | Failed. The pipeline owns the single shared preview region, so at
//! most one export runs at a time: a second request while one is in flight is
//! rejected with `ExportInProgress` rather than interleaved. The Preparing
//! phase's side effects (region reservation, phase marker) are undone by an
//! RAII guard on every exit path — success, error, and panic alike.

pub mod pdf;
pub mod raster;
pub mod txt;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::export::pdf::CompositionPolicy;
use crate::models::ResumeDocument;
use crate::templates::Template;

/// Default rasterization scale. 2x keeps text crisp at A4 print size without
/// approaching the memory ceiling; 4x is the practical maximum.
pub const DEFAULT_SCALE: f32 = 2.0;
pub const MIN_SCALE: f32 = 1.0;
pub const MAX_SCALE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Preparing,
    Rendering,
    Composing,
    Done,
    Failed,
}

/// Caller-tunable knobs for a PDF export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PdfExportOptions {
    #[serde(default)]
    pub policy: Option<CompositionPolicy>,
    #[serde(default)]
    pub scale: Option<f32>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// A finished download: filename, MIME type, payload.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

pub struct ExportPipeline {
    in_flight: AtomicBool,
    phase: Mutex<ExportPhase>,
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportPipeline {
    pub fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            phase: Mutex::new(ExportPhase::Idle),
        }
    }

    pub fn phase(&self) -> ExportPhase {
        *self.phase.lock().expect("export phase lock poisoned")
    }

    /// Runs the full PDF export against one consistent document snapshot.
    ///
    /// Long-running (rasterization can take seconds at high scale); callers
    /// on an async runtime should run it on a blocking thread.
    pub fn export_pdf(
        &self,
        doc: &ResumeDocument,
        template: &Template,
        options: &PdfExportOptions,
    ) -> Result<ExportArtifact, AppError> {
        let mut region = self.reserve_region()?;

        let policy = options.policy.unwrap_or_default();
        let scale = options.scale.unwrap_or(DEFAULT_SCALE).clamp(MIN_SCALE, MAX_SCALE);
        info!(template = template.id, ?policy, scale, "Starting PDF export");

        // Preparing: render the region, apply export hints, make sure the
        // font database is loaded before rasterization begins.
        raster::ensure_initialized();
        let page = (template.render)(doc);
        let tree = raster::parse_region(&page.svg).map_err(AppError::RegionNotFound)?;

        region.set_phase(ExportPhase::Rendering);
        let bitmap = raster::rasterize(&tree, scale).map_err(AppError::Render)?;
        debug!(
            width = bitmap.width_px,
            height = bitmap.height_px,
            "Region rasterized"
        );

        region.set_phase(ExportPhase::Composing);
        let name = sanitize_name(&doc.personal_info.name);
        let bytes = pdf::compose(&bitmap, policy, &name)?;

        let filename = options
            .filename
            .clone()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| pdf_filename(&name, policy, Utc::now().timestamp_millis()));

        region.complete();
        info!(%filename, size = bytes.len(), "PDF export finished");
        Ok(ExportArtifact {
            filename,
            content_type: "application/pdf",
            bytes: Bytes::from(bytes),
        })
    }

    /// Reserves the shared preview region for one export. Fails without side
    /// effects when another export already holds it.
    fn reserve_region(&self) -> Result<RegionGuard<'_>, AppError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::ExportInProgress);
        }
        *self.phase.lock().expect("export phase lock poisoned") = ExportPhase::Preparing;
        Ok(RegionGuard {
            pipeline: self,
            completed: false,
        })
    }
}

/// Holds the exclusive region reservation. Dropping it restores the region —
/// phase back to Done/Failed and the in-flight flag released — no matter how
/// the export exits.
struct RegionGuard<'a> {
    pipeline: &'a ExportPipeline,
    completed: bool,
}

impl RegionGuard<'_> {
    fn set_phase(&self, phase: ExportPhase) {
        *self.pipeline.phase.lock().expect("export phase lock poisoned") = phase;
    }

    fn complete(&mut self) {
        self.completed = true;
    }
}

impl Drop for RegionGuard<'_> {
    fn drop(&mut self) {
        let final_phase = if self.completed {
            ExportPhase::Done
        } else {
            ExportPhase::Failed
        };
        if let Ok(mut phase) = self.pipeline.phase.lock() {
            *phase = final_phase;
        }
        self.pipeline.in_flight.store(false, Ordering::Release);
    }
}

/// Collapses whitespace runs to single underscores; empty input falls back to
/// `resume`.
pub fn sanitize_name(name: &str) -> String {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    if joined.is_empty() {
        "resume".to_string()
    } else {
        joined
    }
}

/// `<name>[_margins]_<unix-millis>.pdf`
fn pdf_filename(sanitized_name: &str, policy: CompositionPolicy, timestamp_ms: i64) -> String {
    match policy {
        CompositionPolicy::Fill => format!("{sanitized_name}_{timestamp_ms}.pdf"),
        CompositionPolicy::Margin { .. } => format!("{sanitized_name}_margins_{timestamp_ms}.pdf"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    fn make_doc() -> ResumeDocument {
        let mut doc = ResumeDocument::create_sample();
        doc.personal_info.name = "Jane Doe".to_string();
        doc
    }

    #[test]
    fn test_sanitize_name_collapses_whitespace_runs() {
        assert_eq!(sanitize_name("Jane   van  Doe"), "Jane_van_Doe");
        assert_eq!(sanitize_name("  Jane\tDoe \n"), "Jane_Doe");
        assert_eq!(sanitize_name(""), "resume");
        assert_eq!(sanitize_name("   "), "resume");
    }

    #[test]
    fn test_pdf_filename_convention() {
        assert_eq!(
            pdf_filename("Jane_Doe", CompositionPolicy::Fill, 1700000000000),
            "Jane_Doe_1700000000000.pdf"
        );
        assert_eq!(
            pdf_filename("resume", CompositionPolicy::Margin { margin_mm: 10.0 }, 42),
            "resume_margins_42.pdf"
        );
    }

    #[test]
    fn test_export_produces_pdf_artifact() {
        let pipeline = ExportPipeline::new();
        let template = templates::resolve("dynamic-grid");
        let artifact = pipeline
            .export_pdf(&make_doc(), template, &PdfExportOptions::default())
            .unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(artifact.content_type, "application/pdf");
        assert!(artifact.filename.starts_with("Jane_Doe_"));
        assert!(artifact.filename.ends_with(".pdf"));
        assert_eq!(pipeline.phase(), ExportPhase::Done);
    }

    #[test]
    fn test_explicit_filename_overrides_convention() {
        let pipeline = ExportPipeline::new();
        let template = templates::default_template();
        let options = PdfExportOptions {
            filename: Some("my_resume.pdf".to_string()),
            ..Default::default()
        };
        let artifact = pipeline.export_pdf(&make_doc(), template, &options).unwrap();
        assert_eq!(artifact.filename, "my_resume.pdf");
    }

    #[test]
    fn test_margin_policy_tags_filename() {
        let pipeline = ExportPipeline::new();
        let template = templates::default_template();
        let options = PdfExportOptions {
            policy: Some(CompositionPolicy::margin()),
            ..Default::default()
        };
        let artifact = pipeline.export_pdf(&make_doc(), template, &options).unwrap();
        assert!(artifact.filename.contains("_margins_"), "{}", artifact.filename);
    }

    #[test]
    fn test_second_export_while_in_flight_is_rejected() {
        let pipeline = ExportPipeline::new();
        let guard = pipeline.reserve_region().unwrap();
        assert_eq!(pipeline.phase(), ExportPhase::Preparing);

        let err = pipeline
            .export_pdf(
                &make_doc(),
                templates::default_template(),
                &PdfExportOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::ExportInProgress));
        // the in-flight reservation is untouched by the rejected attempt
        assert_eq!(pipeline.phase(), ExportPhase::Preparing);
        drop(guard);
    }

    #[test]
    fn test_region_released_after_failure() {
        let pipeline = ExportPipeline::new();
        let template = templates::default_template();
        let bad_options = PdfExportOptions {
            policy: Some(CompositionPolicy::Margin { margin_mm: 500.0 }),
            ..Default::default()
        };
        let err = pipeline.export_pdf(&make_doc(), template, &bad_options).unwrap_err();
        assert!(matches!(err, AppError::Composition(_)));
        assert_eq!(pipeline.phase(), ExportPhase::Failed);

        // region is free again: a follow-up export succeeds
        let artifact = pipeline
            .export_pdf(&make_doc(), template, &PdfExportOptions::default())
            .unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(pipeline.phase(), ExportPhase::Done);
    }

    #[test]
    fn test_guard_drop_releases_region() {
        let pipeline = ExportPipeline::new();
        {
            let _guard = pipeline.reserve_region().unwrap();
        }
        assert_eq!(pipeline.phase(), ExportPhase::Failed);
        assert!(pipeline.reserve_region().is_ok());
    }

    #[test]
    fn test_scale_is_clamped() {
        assert_eq!(10.0_f32.clamp(MIN_SCALE, MAX_SCALE), MAX_SCALE);
        assert_eq!(0.1_f32.clamp(MIN_SCALE, MAX_SCALE), MIN_SCALE);
        assert_eq!(DEFAULT_SCALE.clamp(MIN_SCALE, MAX_SCALE), DEFAULT_SCALE);
    }
}
