//! Gemini `generateContent` client for image-to-image restoration.
//!
//! One call per restoration: the source image travels as an inline base64
//! part next to the instruction text, and the response is asked to be image
//! only. No retries and no request timeout.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::RestoreError;

/// Response modality requesting image output only.
pub const IMAGE_MODALITY: &str = "IMAGE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// A content part: inline binary data or text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Build the request body: image part first, then the instruction text.
pub fn build_request_body(
    image_base64: &str,
    mime_type: &str,
    prompt: &str,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part {
                    inline_data: Some(InlineData {
                        mime_type: mime_type.to_string(),
                        data: image_base64.to_string(),
                    }),
                    text: None,
                },
                Part {
                    inline_data: None,
                    text: Some(prompt.to_string()),
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec![IMAGE_MODALITY.to_string()],
        },
    }
}

/// Pull the first inline image payload out of the first candidate.
pub fn extract_image_data(response: &GenerateContentResponse) -> Result<String, RestoreError> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.inline_data.as_ref())
                .find(|d| !d.data.is_empty())
        })
        .map(|d| d.data.clone())
        .ok_or(RestoreError::NoImageData)
}

/// Turn a non-2xx body into a readable message, preferring the API's own text.
fn service_error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        if !envelope.error.message.is_empty() {
            return envelope.error.message;
        }
    }
    if body.len() > 1024 {
        let mut end = 1024;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self, RestoreError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| RestoreError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send one restoration request and return the base64 image data.
    pub async fn restore_image(
        &self,
        image_base64: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, RestoreError> {
        let body = build_request_body(image_base64, mime_type, prompt);
        info!(
            "Calling Gemini model '{}' ({} base64 chars, {})",
            self.model,
            image_base64.len(),
            mime_type
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini request failed: {}", e);
                RestoreError::Transport(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed to read Gemini response body: {}", e);
            RestoreError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            let message = service_error_message(&text);
            error!("Gemini API error {}: {}", status, message);
            return Err(RestoreError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            error!("Malformed Gemini response: {}", e);
            RestoreError::Transport(format!("Malformed response: {}", e))
        })?;

        extract_image_data(&parsed)
    }
}
