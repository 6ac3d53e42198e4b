//! Source image checks applied before any network traffic.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::RestoreError;

/// MIME types accepted as restoration input.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

pub const MAX_FILE_SIZE_MB: usize = 4;

/// Largest accepted source image, inclusive.
pub const MAX_FILE_SIZE_BYTES: usize = MAX_FILE_SIZE_MB * 1024 * 1024;

pub fn validate_mime_type(mime_type: &str) -> Result<(), RestoreError> {
    if ALLOWED_MIME_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err(RestoreError::Validation(
            "Only JPG, PNG, or WEBP formats are accepted.".to_string(),
        ))
    }
}

pub fn validate_size(size_bytes: usize) -> Result<(), RestoreError> {
    if size_bytes <= MAX_FILE_SIZE_BYTES {
        Ok(())
    } else {
        Err(RestoreError::Validation(format!(
            "Image size too large. Please select an image under {}MB.",
            MAX_FILE_SIZE_MB
        )))
    }
}

/// Check a base64 payload and its declared MIME type.
///
/// Returns the decoded size in bytes.
pub fn validate_source(image_base64: &str, mime_type: &str) -> Result<usize, RestoreError> {
    validate_mime_type(mime_type)?;

    let bytes = STANDARD
        .decode(image_base64.trim())
        .map_err(|e| RestoreError::Validation(format!("Invalid base64 image data: {}", e)))?;
    if bytes.is_empty() {
        return Err(RestoreError::Validation("Image data is empty.".to_string()));
    }

    validate_size(bytes.len())?;
    Ok(bytes.len())
}
