mod commands;
pub mod config;
pub mod error;
pub mod restoration;

pub use error::RestoreError;
pub use restoration::{RestorationOption, RestorationOptions, RestoreRequest, RestoreResponse};

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Photo Restorer starting (model: {})", config::MODEL_NAME);

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::keychain::set_api_key,
            commands::keychain::has_api_key,
            commands::keychain::delete_api_key,
            commands::config::get_preference,
            commands::config::set_preference,
            commands::restore::restore_photo,
            commands::restore::credential_status,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
