use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Credential(String),

    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Request to Gemini API failed: {0}")]
    Transport(String),

    #[error("Gemini API error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("No image data received from Gemini API.")]
    NoImageData,
}

impl From<RestoreError> for String {
    fn from(err: RestoreError) -> Self {
        err.to_string()
    }
}
