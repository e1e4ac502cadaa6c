//! Persistence adapter — durable client-side-style key-value storage.
//!
//! Two fixed keys live under the data directory: the JSON-serialized resume
//! document (wrapped in a versioned envelope) and the selected template id as
//! a plain string. Saving is best-effort: failures are logged and swallowed,
//! never surfaced to the caller. Loading is defensive: malformed or
//! version-mismatched blobs are discarded, cleared from storage, and reported
//! as absent so the controller falls back to a default document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::ResumeDocument;

const DOCUMENT_KEY: &str = "resume_flow_data.json";
const TEMPLATE_KEY: &str = "resume_flow_template";

/// Persisted blobs carry a schema version; anything but the current version
/// is treated the same as corruption and discarded on load.
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    doc: ResumeDocument,
}

/// Restored state: the document plus the template id selected when it was
/// last saved (absent for never-saved or pre-selection states).
#[derive(Debug, Clone, PartialEq)]
pub struct StoredState {
    pub doc: ResumeDocument,
    pub template_id: Option<String>,
}

pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    /// Opens the store, creating the data directory if needed. Directory
    /// creation failure is fatal at startup — there is nowhere to persist.
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!("Document store opened at {}", dir.display());
        Ok(Self { dir })
    }

    /// Writes both keys, overwriting prior values. Best-effort: any failure
    /// is logged and swallowed. Only the last write's eventual success
    /// matters, so there is no durability handshake.
    pub fn save(&self, doc: &ResumeDocument, template_id: &str) {
        let envelope = Envelope {
            version: SCHEMA_VERSION,
            doc: doc.clone(),
        };
        match serde_json::to_vec(&envelope) {
            Ok(bytes) => {
                if let Err(e) = fs::write(self.key_path(DOCUMENT_KEY), bytes) {
                    warn!("Failed to persist resume document: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize resume document: {e}"),
        }
        if let Err(e) = fs::write(self.key_path(TEMPLATE_KEY), template_id) {
            warn!("Failed to persist template selection: {e}");
        }
    }

    /// Reads back the stored state. Returns `None` when no document was ever
    /// saved or when the stored blob cannot be understood — in the latter
    /// case the corrupted key is removed so the next load is a clean miss.
    pub fn load(&self) -> Option<StoredState> {
        let doc_path = self.key_path(DOCUMENT_KEY);
        let bytes = match fs::read(&doc_path) {
            Ok(bytes) => bytes,
            Err(_) => return None,
        };

        let doc = match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) if envelope.version == SCHEMA_VERSION => envelope.doc,
            Ok(envelope) => {
                warn!(
                    "Discarding persisted document with schema version {} (expected {})",
                    envelope.version, SCHEMA_VERSION
                );
                self.clear(&doc_path);
                return None;
            }
            Err(e) => {
                warn!("Discarding corrupted persisted document: {e}");
                self.clear(&doc_path);
                return None;
            }
        };

        let template_id = fs::read_to_string(self.key_path(TEMPLATE_KEY))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Some(StoredState { doc, template_id })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn clear(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to clear corrupted key {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_store() -> (TempDir, DocumentStore) {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_load_without_save_is_none() {
        let (_dir, store) = make_store();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, store) = make_store();
        let doc = ResumeDocument::create_sample();
        store.save(&doc, "tech-savvy");

        let state = store.load().expect("saved state should load");
        assert_eq!(state.doc, doc);
        assert_eq!(state.template_id.as_deref(), Some("tech-savvy"));
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let (_dir, store) = make_store();
        let first = ResumeDocument::create_sample();
        store.save(&first, "avant-garde");

        let mut second = first.clone();
        second.summary = "updated".to_string();
        store.save(&second, "vibrant-ui");

        let state = store.load().unwrap();
        assert_eq!(state.doc.summary, "updated");
        assert_eq!(state.template_id.as_deref(), Some("vibrant-ui"));
    }

    #[test]
    fn test_corrupted_blob_is_cleared_and_returns_none() {
        let (dir, store) = make_store();
        let doc_path = dir.path().join(DOCUMENT_KEY);
        fs::write(&doc_path, b"not json at all {{{").unwrap();

        assert!(store.load().is_none());
        assert!(!doc_path.exists(), "corrupted key must be removed");
        // subsequent load is a clean miss, not an error
        assert!(store.load().is_none());
    }

    #[test]
    fn test_schema_version_mismatch_is_discarded() {
        let (dir, store) = make_store();
        let stale = serde_json::json!({
            "version": 99,
            "doc": ResumeDocument::create_default(),
        });
        fs::write(
            dir.path().join(DOCUMENT_KEY),
            serde_json::to_vec(&stale).unwrap(),
        )
        .unwrap();

        assert!(store.load().is_none());
        assert!(!dir.path().join(DOCUMENT_KEY).exists());
    }

    #[test]
    fn test_missing_template_key_loads_as_none() {
        let (dir, store) = make_store();
        store.save(&ResumeDocument::create_default(), "dynamic-grid");
        fs::remove_file(dir.path().join(TEMPLATE_KEY)).unwrap();

        let state = store.load().unwrap();
        assert_eq!(state.template_id, None);
    }
}
