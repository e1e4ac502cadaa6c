//! Application controller — the single writer of the current resume document.
//!
//! All edits funnel through [`Controller::edit`]: take the lock, build a
//! complete new document via a pure operation, replace the held one, persist
//! best-effort while still holding the lock (so writes hit storage in edit
//! order), release. Readers take a snapshot clone and never observe a
//! half-applied edit.

use std::collections::HashSet;
use std::sync::Mutex;

use tracing::info;

use crate::config::SeedMode;
use crate::errors::AppError;
use crate::models::ResumeDocument;
use crate::store::DocumentStore;
use crate::templates;

struct CurrentState {
    doc: ResumeDocument,
    template_id: String,
}

pub struct Controller {
    store: DocumentStore,
    current: Mutex<CurrentState>,
}

impl Controller {
    /// Restores prior state from the store, falling back to a seed document
    /// and the default template. A persisted template id referencing a
    /// removed template silently resolves to the registry default.
    pub fn restore_or_seed(store: DocumentStore, seed_mode: SeedMode) -> Self {
        let (doc, template_id) = match store.load() {
            Some(state) => {
                info!("Restored persisted resume document");
                let template_id = state
                    .template_id
                    .as_deref()
                    .map(|id| templates::resolve(id).id)
                    .unwrap_or(templates::default_template().id);
                (state.doc, template_id.to_string())
            }
            None => {
                let doc = match seed_mode {
                    SeedMode::Empty => ResumeDocument::create_default(),
                    SeedMode::Sample => ResumeDocument::create_sample(),
                };
                info!("No persisted state, seeding {seed_mode:?} document");
                (doc, templates::default_template().id.to_string())
            }
        };

        Self {
            store,
            current: Mutex::new(CurrentState { doc, template_id }),
        }
    }

    /// One consistent snapshot of the document and selected template id.
    pub fn snapshot(&self) -> (ResumeDocument, String) {
        let state = self.current.lock().expect("controller lock poisoned");
        (state.doc.clone(), state.template_id.clone())
    }

    /// Applies one pure edit operation and persists the result. The returned
    /// document is the new current state.
    pub fn edit(
        &self,
        op: impl FnOnce(&ResumeDocument) -> Result<ResumeDocument, AppError>,
    ) -> Result<ResumeDocument, AppError> {
        let mut state = self.current.lock().expect("controller lock poisoned");
        let next = op(&state.doc)?;
        state.doc = next.clone();
        self.store.save(&state.doc, &state.template_id);
        Ok(next)
    }

    /// Whole-document replacement. The incoming document must honor the
    /// unique-id invariant; everything else (empty fields, any order) is
    /// legal.
    pub fn replace_document(&self, doc: ResumeDocument) -> Result<ResumeDocument, AppError> {
        validate_unique_ids(&doc)?;
        self.edit(move |_| Ok(doc))
    }

    /// Selects a template by id (unknown ids resolve to the default) and
    /// persists the selection. Returns the resolved template.
    pub fn select_template(&self, template_id: &str) -> &'static templates::Template {
        let template = templates::resolve(template_id);
        let mut state = self.current.lock().expect("controller lock poisoned");
        state.template_id = template.id.to_string();
        self.store.save(&state.doc, &state.template_id);
        template
    }
}

fn validate_unique_ids(doc: &ResumeDocument) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for id in doc.experience.iter().map(|e| e.id) {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!(
                "duplicate experience entry id {id}"
            )));
        }
    }
    seen.clear();
    for id in doc.education.iter().map(|e| e.id) {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!(
                "duplicate education entry id {id}"
            )));
        }
    }
    Ok(())
}
