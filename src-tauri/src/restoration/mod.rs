//! Photo restoration through an external image model.

pub mod gemini;
pub mod options;
pub mod prompt;
pub mod service;
pub mod types;
pub mod validation;

pub use gemini::GeminiClient;
pub use options::{RestorationOption, RestorationOptions};
pub use prompt::build_restoration_prompt;
pub use service::restore;
pub use types::{CredentialStatus, RestoreRequest, RestoreResponse};
