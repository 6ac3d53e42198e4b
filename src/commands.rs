use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::lifecycle::{RestoreTicket, RestoredImage};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| "Unknown error".to_string())
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct SetApiKeyArgs {
    key: String,
}

#[derive(Serialize)]
struct GetPreferenceArgs {
    key: String,
}

#[derive(Serialize)]
struct SetPreferenceArgs {
    key: String,
    value: String,
}

/// Wrapper to provide the `request` key expected by the Tauri command.
#[derive(Serialize)]
struct RestorePhotoArgs<'a> {
    request: &'a RestoreTicket,
}

// -- Response types matching backend structs --

#[derive(Debug, Clone, Deserialize)]
struct RestoreResponse {
    image_base64: String,
    mime_type: String,
    file_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CredentialStatus {
    pub configured: bool,
    pub source: Option<String>,
}

// -- Typed invoke helpers --

/// Send one restoration request. Errors are the backend message verbatim.
pub async fn restore_photo(ticket: &RestoreTicket) -> Result<RestoredImage, String> {
    let args = serde_wasm_bindgen::to_value(&RestorePhotoArgs { request: ticket })
        .map_err(|e| e.to_string())?;

    let result = invoke("restore_photo", args).await.map_err(js_error)?;

    let response: RestoreResponse = serde_wasm_bindgen::from_value(result)
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(RestoredImage {
        image_base64: response.image_base64,
        mime_type: response.mime_type,
        file_name: response.file_name,
    })
}

pub async fn credential_status() -> Result<CredentialStatus, String> {
    let args = serde_wasm_bindgen::to_value(&serde_json::json!({}))
        .map_err(|e| e.to_string())?;

    let result = invoke("credential_status", args).await.map_err(js_error)?;

    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn set_api_key(key: &str) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&SetApiKeyArgs {
        key: key.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke("set_api_key", args).await.map(|_| ()).map_err(js_error)
}

pub async fn has_api_key() -> Result<bool, String> {
    let args = serde_wasm_bindgen::to_value(&serde_json::json!({}))
        .map_err(|e| e.to_string())?;

    let result = invoke("has_api_key", args).await.map_err(js_error)?;

    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn delete_api_key() -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&serde_json::json!({}))
        .map_err(|e| e.to_string())?;

    invoke("delete_api_key", args).await.map(|_| ()).map_err(js_error)
}

pub async fn get_preference(key: &str) -> Result<Option<String>, String> {
    let args = serde_wasm_bindgen::to_value(&GetPreferenceArgs {
        key: key.to_string(),
    })
    .map_err(|e| e.to_string())?;

    let result = invoke("get_preference", args).await.map_err(js_error)?;

    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn set_preference(key: &str, value: &str) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&SetPreferenceArgs {
        key: key.to_string(),
        value: value.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke("set_preference", args).await.map(|_| ()).map_err(js_error)
}
