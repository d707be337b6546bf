//! # Uploaded File Types
//!
//! Maps picked files to the MIME type sent with inline data and decides whether a
//! soil card is read as text or attached as a binary document.

use std::path::Path;

/// How an uploaded file is forwarded to the AI backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Sent as prompt text
    Text,
    /// Sent as base64 inline data
    Inline,
}

/// MIME type and upload kind for a file, judged by extension.
///
/// Returns `None` for types the assistant does not accept.
pub fn mime_from_path(path: &Path) -> Option<(&'static str, UploadKind)> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let found = match ext.as_str() {
        "txt" | "csv" => ("text/plain", UploadKind::Text),
        "json" => ("application/json", UploadKind::Text),
        "pdf" => ("application/pdf", UploadKind::Inline),
        "jpg" | "jpeg" => ("image/jpeg", UploadKind::Inline),
        "png" => ("image/png", UploadKind::Inline),
        "webp" => ("image/webp", UploadKind::Inline),
        _ => return None,
    };
    Some(found)
}
