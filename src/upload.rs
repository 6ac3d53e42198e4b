//! Source image selection: validation, reading, and preview URLs.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;
use wasm_bindgen::JsCast;

/// MIME types accepted for upload.
pub const ALLOWED_FILE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

pub const MAX_FILE_SIZE_MB: u64 = 4;

/// Largest accepted file, inclusive.
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Only JPG, PNG, or WEBP formats are accepted.")]
    UnsupportedType(String),
    #[error("Image size too large. Please select an image under {max}MB.", max = MAX_FILE_SIZE_MB)]
    TooLarge(u64),
}

/// Check a file's declared type and size. Type is checked first.
pub fn validate_file(mime_type: &str, size_bytes: u64) -> Result<(), ValidationError> {
    if !ALLOWED_FILE_TYPES.contains(&mime_type) {
        return Err(ValidationError::UnsupportedType(mime_type.to_string()));
    }
    if size_bytes > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::TooLarge(size_bytes));
    }
    Ok(())
}

/// A validated photo ready to be restored.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Base64 bytes without a data URL prefix
    pub image_base64: String,
    /// Object URL for the preview; revoke it when the image is superseded
    pub preview_url: String,
}

/// Validate a picked or dropped file and read it into a `SourceImage`.
///
/// Type and size are checked before any bytes are read.
pub async fn read_source_image(file: web_sys::File) -> Result<SourceImage, String> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let mime_type = file.type_();
    let size_bytes = file.size() as u64;
    validate_file(&mime_type, size_bytes).map_err(|e| e.to_string())?;

    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to convert to ArrayBuffer".to_string())?;
    let bytes = Uint8Array::new(&array_buffer).to_vec();

    let preview_url = web_sys::Url::create_object_url_with_blob(&file)
        .map_err(|e| format!("Failed to create preview: {:?}", e))?;

    Ok(SourceImage {
        file_name: file.name(),
        mime_type,
        size_bytes,
        image_base64: STANDARD.encode(&bytes),
        preview_url,
    })
}

/// Release a preview object URL.
pub fn release_preview(preview_url: &str) {
    if preview_url.starts_with("blob:") {
        let _ = web_sys::Url::revoke_object_url(preview_url);
    }
}
