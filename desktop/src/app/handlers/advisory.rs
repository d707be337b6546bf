//! # Advisory Handlers
//!
//! Turning picked files into uploads for the soil and leaf screens.
//!
//! Soil cards in text form are sent as prompt text; PDFs and photos are attached
//! as base64 inline data. Leaf checks only accept photos.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use lib_core::ai::SoilInput;
use lib_utils::{b64_encode, mime_from_path, UploadKind};
use parking_lot::RwLock;

use crate::app::state::{AppState, LeafImage, NotifyLevel};
use crate::core::error::{AppError, Result};

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read a soil health card into the form the advisory service takes.
pub fn prepare_soil_upload(path: &Path) -> Result<(String, SoilInput)> {
    let (mime_type, kind) = mime_from_path(path).ok_or_else(|| {
        AppError::Validation("Please choose a PDF, image or text file".to_string())
    })?;
    let bytes = fs::read(path)?;

    let input = match kind {
        UploadKind::Text => SoilInput::Text(String::from_utf8_lossy(&bytes).into_owned()),
        UploadKind::Inline => SoilInput::Inline {
            mime_type: mime_type.to_string(),
            data: b64_encode(&bytes),
        },
    };
    Ok((file_name(path), input))
}

/// Read a leaf photo for diagnosis and preview.
pub fn prepare_leaf_upload(path: &Path) -> Result<LeafImage> {
    let mime_type = match mime_from_path(path) {
        Some((mime, _)) if mime.starts_with("image/") => mime,
        _ => {
            return Err(AppError::Validation(
                "Please choose a JPEG, PNG or WebP photo".to_string(),
            ))
        }
    };
    let bytes = fs::read(path)?;

    Ok(LeafImage {
        file_name: file_name(path),
        mime_type: mime_type.to_string(),
        b64: b64_encode(&bytes),
        bytes: Arc::from(bytes),
    })
}

/// Handle a soil card picked in the file dialog
pub(crate) fn handle_soil_file(state: Arc<RwLock<AppState>>, path: &Path) {
    let prepared = prepare_soil_upload(path);
    let mut state = state.write();

    match prepared {
        Ok((name, input)) => {
            tracing::info!(file = %name, "Soil card selected");
            let soil = &mut state.soil;
            soil.file_name = Some(name);
            soil.input = Some(input);
            soil.result = None;
            soil.error = None;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Soil card rejected");
            state.soil.error = Some(e.user_message());
            state.notify(NotifyLevel::Error, e.user_message());
        }
    }
}

/// Handle a leaf photo picked in the file dialog
pub(crate) fn handle_leaf_file(state: Arc<RwLock<AppState>>, path: &Path) {
    let prepared = prepare_leaf_upload(path);
    let mut state = state.write();

    match prepared {
        Ok(image) => {
            tracing::info!(file = %image.file_name, bytes = image.bytes.len(), "Leaf photo selected");
            state.leaf.image = Some(image);
            state.leaf.result = None;
            state.leaf.error = None;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Leaf photo rejected");
            state.leaf.error = Some(e.user_message());
            state.notify(NotifyLevel::Error, e.user_message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ========== Soil Upload Tests ==========

    #[test]
    fn test_text_card_is_sent_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.csv");
        fs::write(&path, "pH,7.2\nN,low").unwrap();

        let (name, input) = prepare_soil_upload(&path).unwrap();
        assert_eq!(name, "card.csv");
        assert_eq!(input, SoilInput::Text("pH,7.2\nN,low".to_string()));
    }

    #[test]
    fn test_pdf_card_is_inline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shc.pdf");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let (_, input) = prepare_soil_upload(&path).unwrap();
        match input {
            SoilInput::Inline { mime_type, data } => {
                assert_eq!(mime_type, "application/pdf");
                assert_eq!(data, b64_encode(b"%PDF-1.4"));
            }
            other => panic!("expected inline upload, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_card_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.zip");
        fs::write(&path, [0u8; 4]).unwrap();

        assert!(matches!(prepare_soil_upload(&path), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_missing_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = prepare_soil_upload(&dir.path().join("gone.pdf"));
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    // ========== Leaf Upload Tests ==========

    #[test]
    fn test_leaf_accepts_photos_only() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("leaf.PNG");
        fs::write(&photo, [137u8, 80, 78, 71]).unwrap();
        let pdf = dir.path().join("leaf.pdf");
        fs::write(&pdf, b"%PDF").unwrap();

        let image = prepare_leaf_upload(&photo).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes.len(), 4);
        assert_eq!(image.b64, b64_encode([137u8, 80, 78, 71]));

        assert!(matches!(prepare_leaf_upload(&pdf), Err(AppError::Validation(_))));
    }
}
