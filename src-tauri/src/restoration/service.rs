//! One restoration attempt: validate, compile, call, wrap.

use tracing::info;

use super::gemini::GeminiClient;
use super::prompt::build_restoration_prompt;
use super::types::{RestoreRequest, RestoreResponse};
use super::validation::validate_source;
use crate::error::RestoreError;

/// Run a single restoration request against `client`.
///
/// The instruction is compiled fresh from `request.options`. Any failure,
/// including a response without image data, comes back as an error; there is
/// no retry.
pub async fn restore(
    client: &GeminiClient,
    request: &RestoreRequest,
) -> Result<RestoreResponse, RestoreError> {
    let size = validate_source(&request.image_base64, &request.mime_type)?;
    let enabled: Vec<&str> = request.options.enabled().map(|o| o.key()).collect();
    info!(
        "Restoring {} image ({} bytes) with options [{}]",
        request.mime_type,
        size,
        enabled.join(", ")
    );

    let prompt = build_restoration_prompt(&request.options);
    let image_base64 = client
        .restore_image(request.image_base64.trim(), &request.mime_type, &prompt)
        .await?;

    info!("Restoration returned {} base64 chars", image_base64.len());
    Ok(RestoreResponse::png(
        image_base64,
        chrono::Utc::now().timestamp_millis(),
    ))
}
