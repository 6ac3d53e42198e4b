//! Tauri commands for photo restoration.
//!
//! `restore_photo` performs exactly one outbound call per invocation and
//! returns either the restored PNG or the failure message verbatim.

use tracing::{error, info, warn};

use crate::config::{api_base_url, resolve_credential, MODEL_NAME};
use crate::error::RestoreError;
use crate::restoration::{self, CredentialStatus, GeminiClient, RestoreRequest, RestoreResponse};

/// Restore a photo with the selected options.
///
/// # Arguments
/// * `request` - Base64 image, its MIME type, and the option set
///
/// # Returns
/// The restored image as base64 PNG with a suggested download file name.
#[tauri::command]
pub async fn restore_photo(request: RestoreRequest) -> Result<RestoreResponse, String> {
    info!("Starting photo restoration");

    let credential = resolve_credential().map_err(|e| {
        warn!("No usable credential: {}", e);
        e.to_string()
    })?;
    let client = GeminiClient::new(&api_base_url(), MODEL_NAME, &credential.api_key)?;

    match restoration::restore(&client, &request).await {
        Ok(response) => {
            info!("Restoration complete: {}", response.file_name);
            Ok(response)
        }
        Err(e) => {
            error!("Restoration failed: {}", e);
            Err(e.into())
        }
    }
}

/// Report whether a Gemini API key is available and where it comes from.
#[tauri::command]
pub fn credential_status() -> Result<CredentialStatus, String> {
    match resolve_credential() {
        Ok(credential) => Ok(CredentialStatus {
            configured: true,
            source: Some(credential.source),
        }),
        Err(RestoreError::Credential(msg)) => {
            info!("Credential status: {}", msg);
            Ok(CredentialStatus {
                configured: false,
                source: None,
            })
        }
        Err(e) => Err(e.into()),
    }
}
