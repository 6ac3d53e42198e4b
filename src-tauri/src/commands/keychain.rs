use keyring::Entry;
use tracing::{info, warn};

use crate::config::{KEYCHAIN_SERVICE, KEYCHAIN_USER};
use crate::error::RestoreError;

fn gemini_entry() -> Result<Entry, RestoreError> {
    Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_USER).map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", KEYCHAIN_SERVICE, e);
        RestoreError::Keychain(e.to_string())
    })
}

#[tauri::command]
pub fn set_api_key(key: &str) -> Result<(), String> {
    let key = key.trim();
    if key.is_empty() {
        return Err(RestoreError::Validation("API key must not be empty".to_string()).into());
    }
    info!("Saving Gemini API key to keychain");
    gemini_entry()?.set_password(key).map_err(|e| {
        warn!("Failed to set password for {}: {}", KEYCHAIN_SERVICE, e);
        RestoreError::Keychain(e.to_string()).into()
    })
}

/// Whether a key is stored. The key itself never leaves the backend.
#[tauri::command]
pub fn has_api_key() -> Result<bool, String> {
    match gemini_entry()?.get_password() {
        Ok(_) => Ok(true),
        Err(keyring::Error::NoEntry) => {
            info!("No API key stored for {}", KEYCHAIN_SERVICE);
            Ok(false)
        }
        Err(e) => {
            warn!("Failed to get password for {}: {}", KEYCHAIN_SERVICE, e);
            Err(RestoreError::Keychain(e.to_string()).into())
        }
    }
}

#[tauri::command]
pub fn delete_api_key() -> Result<(), String> {
    info!("Deleting Gemini API key from keychain");
    match gemini_entry()?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => {
            warn!("Failed to delete credential for {}: {}", KEYCHAIN_SERVICE, e);
            Err(RestoreError::Keychain(e.to_string()).into())
        }
    }
}
