//! Preference storage backed by `tauri-plugin-store`.
//!
//! Values are opaque strings except for the saved restoration options,
//! which must decode as `RestorationOptions` before they are written.

use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::{debug, info, warn};

use crate::error::RestoreError;
use crate::restoration::RestorationOptions;

/// Store file holding user preferences.
pub const PREFERENCES_STORE: &str = "preferences.json";

/// Key of the last used option set.
pub const OPTIONS_KEY: &str = "restoration_options";

/// Reject values that would not load back for keys with a known shape.
pub fn check_preference(key: &str, value: &str) -> Result<(), RestoreError> {
    if key.trim().is_empty() {
        return Err(RestoreError::Config("Preference key must not be empty".to_string()));
    }
    if key == OPTIONS_KEY {
        serde_json::from_str::<RestorationOptions>(value).map_err(|e| {
            RestoreError::Config(format!("Invalid restoration options: {}", e))
        })?;
    }
    Ok(())
}

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    debug!("Getting preference: {}", key);
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        RestoreError::Config(e.to_string())
    })?;
    Ok(store.get(key).and_then(|v| v.as_str().map(|s| s.to_string())))
}

#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    check_preference(key, value).map_err(|e| {
        warn!("Refusing preference {}: {}", key, e);
        e
    })?;

    info!("Setting preference: {}", key);
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        RestoreError::Config(e.to_string())
    })?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        RestoreError::Config(e.to_string()).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_options() {
        let value = serde_json::to_string(&RestorationOptions::default()).unwrap();
        assert!(check_preference(OPTIONS_KEY, &value).is_ok());
    }

    #[test]
    fn test_rejects_malformed_options() {
        let err = check_preference(OPTIONS_KEY, "{\"colorize\":true}").unwrap_err();
        assert!(matches!(err, RestoreError::Config(_)));
        assert!(check_preference(OPTIONS_KEY, "not json").is_err());
    }

    #[test]
    fn test_other_keys_are_opaque() {
        assert!(check_preference("window_size", "anything").is_ok());
        assert!(check_preference("  ", "x").is_err());
    }
}
