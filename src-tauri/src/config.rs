//! Service configuration: model identifier, endpoint, and credential lookup.
//!
//! The API key comes from the process environment first and falls back to the
//! OS keychain entry managed by the API key form.

use keyring::Entry;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::RestoreError;

/// Image-capable Gemini model used for every restoration call.
pub const MODEL_NAME: &str = "gemini-2.5-flash-image";

/// Default Gemini REST endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables checked for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Environment variable overriding the endpoint (useful for proxies and tests).
pub const BASE_URL_ENV_VAR: &str = "GEMINI_API_BASE_URL";

/// Keychain service identifier for a user-entered key.
pub const KEYCHAIN_SERVICE: &str = "photo-restorer-gemini-api";

/// Keychain account name shared by all entries of this app.
pub const KEYCHAIN_USER: &str = "photo-restorer";

/// Where a resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    Environment,
    Keychain,
}

#[derive(Debug, Clone)]
pub struct Credential {
    pub api_key: String,
    pub source: CredentialSource,
}

/// Look up the API key through `lookup`, skipping unset and blank values.
pub fn api_key_from_env_with<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_ENV_VARS.iter().find_map(|name| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

fn api_key_from_env() -> Option<String> {
    api_key_from_env_with(|name| std::env::var(name).ok())
}

/// Read the key stored in the OS keychain, if any.
pub fn keychain_api_key() -> Result<Option<String>, RestoreError> {
    let entry = Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_USER)
        .map_err(|e| RestoreError::Keychain(e.to_string()))?;
    match entry.get_password() {
        Ok(key) if !key.trim().is_empty() => Ok(Some(key.trim().to_string())),
        Ok(_) => Ok(None),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => {
            warn!("Failed to read keychain entry {}: {}", KEYCHAIN_SERVICE, e);
            Err(RestoreError::Keychain(e.to_string()))
        }
    }
}

/// Resolve the API key: environment first, then keychain.
pub fn resolve_credential() -> Result<Credential, RestoreError> {
    if let Some(api_key) = api_key_from_env() {
        info!("Using Gemini API key from environment");
        return Ok(Credential {
            api_key,
            source: CredentialSource::Environment,
        });
    }

    match keychain_api_key()? {
        Some(api_key) => {
            info!("Using Gemini API key from keychain");
            Ok(Credential {
                api_key,
                source: CredentialSource::Keychain,
            })
        }
        None => Err(RestoreError::Credential(format!(
            "No Gemini API key configured. Set {} or save a key in the app.",
            API_KEY_ENV_VARS[0]
        ))),
    }
}

/// Endpoint base URL with any trailing slash removed.
pub fn api_base_url_with<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(BASE_URL_ENV_VAR)
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

pub fn api_base_url() -> String {
    api_base_url_with(|name| std::env::var(name).ok())
}
