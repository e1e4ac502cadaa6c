//! Plain-text export — bypasses the raster pipeline entirely.

use bytes::Bytes;

use crate::export::{sanitize_name, ExportArtifact};
use crate::models::text::serialize_for_ai;
use crate::models::ResumeDocument;

/// Builds the TXT download artifact. This path has no failure modes of its
/// own: the serialization is pure and the bytes are handed straight to the
/// host for download.
pub fn export_txt(doc: &ResumeDocument) -> ExportArtifact {
    let text = serialize_for_ai(doc);
    ExportArtifact {
        filename: format!("{}.txt", sanitize_name(&doc.personal_info.name)),
        content_type: "text/plain; charset=utf-8",
        bytes: Bytes::from(text.into_bytes()),
    }
}
