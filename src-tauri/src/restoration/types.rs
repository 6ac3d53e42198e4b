//! Types crossing the Tauri bridge for restoration.

use serde::{Deserialize, Serialize};

use super::options::RestorationOptions;
use crate::config::CredentialSource;

/// Output encoding of every restored image.
pub const OUTPUT_MIME_TYPE: &str = "image/png";

/// Request from the frontend. The instruction is compiled here, not there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreRequest {
    /// Base64-encoded source bytes (no data URL prefix)
    pub image_base64: String,
    /// Original MIME type of the source file
    pub mime_type: String,
    pub options: RestorationOptions,
}

/// Successful restoration payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreResponse {
    pub image_base64: String,
    /// Always `image/png`
    pub mime_type: String,
    /// Suggested download name, `restored-<unix-millis>.png`
    pub file_name: String,
}

impl RestoreResponse {
    pub fn png(image_base64: String, timestamp_millis: i64) -> Self {
        Self {
            image_base64,
            mime_type: OUTPUT_MIME_TYPE.to_string(),
            file_name: download_file_name(timestamp_millis),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialStatus {
    pub configured: bool,
    pub source: Option<CredentialSource>,
}

pub fn download_file_name(timestamp_millis: i64) -> String {
    format!("restored-{}.png", timestamp_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_file_name() {
        assert_eq!(download_file_name(1700000000123), "restored-1700000000123.png");
    }

    #[test]
    fn test_response_is_always_png() {
        let resp = RestoreResponse::png("abc".to_string(), 42);
        assert_eq!(resp.mime_type, "image/png");
        assert_eq!(resp.file_name, "restored-42.png");
    }

    #[test]
    fn test_request_deserialize() {
        let json = r#"{
            "image_base64": "QUJD",
            "mime_type": "image/webp",
            "options": {"colorize": true, "denoise": false, "fix_scratches": true, "sharpen_face": false, "upscale": true}
        }"#;
        let req: RestoreRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.mime_type, "image/webp");
        assert!(req.options.upscale);
        assert!(!req.options.denoise);
    }

    #[test]
    fn test_credential_status_serialize() {
        let status = CredentialStatus {
            configured: true,
            source: Some(CredentialSource::Environment),
        };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"environment\""));
    }
}
