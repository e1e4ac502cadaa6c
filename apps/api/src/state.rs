use std::sync::Arc;

use crate::ai::AiAssist;
use crate::config::Config;
use crate::controller::Controller;
use crate::export::ExportPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Single-writer owner of the current document and template selection.
    pub controller: Arc<Controller>,
    /// Export pipeline — also the exclusive-access guard for the preview region.
    pub exports: Arc<ExportPipeline>,
    /// Pluggable AI assistant. `DisabledAssist` when no API key is configured.
    pub ai: Arc<dyn AiAssist>,
    pub config: Config,
}
