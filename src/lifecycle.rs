//! Restoration request lifecycle.
//!
//! ```text
//! Idle --select--> Ready --start--> InFlight --finish(ok)--> Completed
//!                    ^                  |                        |
//!                    +---finish(err)----+                        |
//!                    +-----------adjust_settings-----------------+
//! any (except InFlight) --reset--> Idle
//! ```
//!
//! Pure state; side effects (invoking the backend, revoking preview URLs)
//! happen around these transitions in the page component.

use serde::Serialize;
use thiserror::Error;

use crate::options::{RestorationOption, RestorationOptions};
use crate::upload::{validate_file, SourceImage, ValidationError};

/// Shown when a failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to restore image. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    InFlight,
    Completed,
}

/// A restored image, always PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredImage {
    pub image_base64: String,
    pub mime_type: String,
    pub file_name: String,
}

impl RestoredImage {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.image_base64)
    }
}

/// Snapshot of what one outbound request carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestoreTicket {
    pub image_base64: String,
    pub mime_type: String,
    pub options: RestorationOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("A restoration is already in progress")]
    Busy,
    #[error("Select an image first")]
    NoImage,
    #[error("No restoration is in progress")]
    NotInFlight,
    #[error("Adjust settings before restoring again")]
    NotReady,
    #[error("There is no result to adjust")]
    NotCompleted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestorationSession {
    phase: Phase,
    source: Option<SourceImage>,
    options: RestorationOptions,
    result: Option<RestoredImage>,
    error: Option<String>,
}

impl Default for RestorationSession {
    fn default() -> Self {
        Self::new(RestorationOptions::default())
    }
}

impl RestorationSession {
    pub fn new(options: RestorationOptions) -> Self {
        Self {
            phase: Phase::Idle,
            source: None,
            options,
            result: None,
            error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn options(&self) -> RestorationOptions {
        self.options
    }

    pub fn result(&self) -> Option<&RestoredImage> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == Phase::InFlight
    }

    /// Replace the source image.
    ///
    /// On a validation failure the message is recorded and nothing else
    /// changes. On success the superseded image is returned so its preview
    /// URL can be released.
    pub fn select_image(
        &mut self,
        source: SourceImage,
    ) -> Result<Option<SourceImage>, LifecycleError> {
        if self.is_in_flight() {
            return Err(LifecycleError::Busy);
        }
        if let Err(e) = validate_file(&source.mime_type, source.size_bytes) {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        let previous = self.source.replace(source);
        self.result = None;
        self.error = None;
        self.phase = Phase::Ready;
        Ok(previous)
    }

    /// Record an upload problem that never produced a `SourceImage`.
    pub fn reject_selection(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn toggle(&mut self, option: RestorationOption) -> Result<(), LifecycleError> {
        if self.is_in_flight() {
            return Err(LifecycleError::Busy);
        }
        self.options.toggle(option);
        Ok(())
    }

    /// Replace the whole option set, e.g. with stored preferences.
    pub fn set_options(&mut self, options: RestorationOptions) -> Result<(), LifecycleError> {
        if self.is_in_flight() {
            return Err(LifecycleError::Busy);
        }
        self.options = options;
        Ok(())
    }

    /// Lock inputs and hand out the payload for the one outbound call.
    pub fn start(&mut self) -> Result<RestoreTicket, LifecycleError> {
        match self.phase {
            Phase::Ready => {}
            Phase::InFlight => return Err(LifecycleError::Busy),
            Phase::Idle => return Err(LifecycleError::NoImage),
            Phase::Completed => return Err(LifecycleError::NotReady),
        }
        let source = self.source.as_ref().ok_or(LifecycleError::NoImage)?;
        let ticket = RestoreTicket {
            image_base64: source.image_base64.clone(),
            mime_type: source.mime_type.clone(),
            options: self.options,
        };
        self.error = None;
        self.phase = Phase::InFlight;
        Ok(ticket)
    }

    /// Apply the outcome of the in-flight request.
    ///
    /// Success moves to `Completed`. Any failure returns to `Ready` with the
    /// message, keeping the source image and options.
    pub fn finish(&mut self, outcome: Result<RestoredImage, String>) -> Result<(), LifecycleError> {
        if !self.is_in_flight() {
            return Err(LifecycleError::NotInFlight);
        }
        match outcome {
            Ok(image) => {
                self.result = Some(image);
                self.error = None;
                self.phase = Phase::Completed;
            }
            Err(message) => {
                let message = message.trim();
                self.error = Some(if message.is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message.to_string()
                });
                self.result = None;
                self.phase = Phase::Ready;
            }
        }
        Ok(())
    }

    /// Drop the result and go back to editing options.
    pub fn adjust_settings(&mut self) -> Result<(), LifecycleError> {
        if self.phase != Phase::Completed {
            return Err(LifecycleError::NotCompleted);
        }
        self.result = None;
        self.error = None;
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Start over. Options are kept; the discarded source is returned.
    pub fn reset(&mut self) -> Result<Option<SourceImage>, LifecycleError> {
        if self.is_in_flight() {
            return Err(LifecycleError::Busy);
        }
        let previous = self.source.take();
        self.result = None;
        self.error = None;
        self.phase = Phase::Idle;
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(mime: &str, size: u64) -> SourceImage {
        SourceImage {
            file_name: "photo".to_string(),
            mime_type: mime.to_string(),
            size_bytes: size,
            image_base64: format!("b64-{}-{}", mime, size),
            preview_url: format!("blob:preview-{}", size),
        }
    }

    fn restored() -> RestoredImage {
        RestoredImage {
            image_base64: "iVBOR".to_string(),
            mime_type: "image/png".to_string(),
            file_name: "restored-1.png".to_string(),
        }
    }

    fn ready_session() -> RestorationSession {
        let mut session = RestorationSession::default();
        session.select_image(image("image/jpeg", 2 * 1024 * 1024)).unwrap();
        session
    }

    #[test]
    fn test_starts_idle_with_defaults() {
        let session = RestorationSession::default();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.source().is_none());
        assert_eq!(session.options(), RestorationOptions::default());
    }

    #[test]
    fn test_select_valid_image_goes_ready() {
        let session = ready_session();
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.source().unwrap().mime_type, "image/jpeg");
        assert!(session.error().is_none());
    }

    #[test]
    fn test_bad_type_changes_nothing_but_error() {
        let mut session = ready_session();
        let before = session.source().cloned();

        let err = session.select_image(image("image/gif", 10)).unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
        assert_eq!(session.source().cloned(), before);
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(
            session.error(),
            Some("Only JPG, PNG, or WEBP formats are accepted.")
        );
    }

    #[test]
    fn test_bad_type_from_idle_stays_idle() {
        let mut session = RestorationSession::default();
        assert!(session.select_image(image("text/plain", 10)).is_err());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.source().is_none());
        assert!(session.error().is_some());
    }

    #[test]
    fn test_size_boundary() {
        let mut session = RestorationSession::default();
        assert!(session.select_image(image("image/png", 4 * 1024 * 1024)).is_ok());

        let mut session = RestorationSession::default();
        assert!(session
            .select_image(image("image/png", 4 * 1024 * 1024 + 1))
            .is_err());
        assert!(session.source().is_none());
    }

    #[test]
    fn test_new_selection_returns_previous_and_clears_error() {
        let mut session = ready_session();
        session.reject_selection("oops");
        let previous = session.select_image(image("image/webp", 100)).unwrap();
        assert_eq!(previous.unwrap().preview_url, "blob:preview-2097152");
        assert!(session.error().is_none());
        assert_eq!(session.source().unwrap().mime_type, "image/webp");
    }

    #[test]
    fn test_start_only_from_ready() {
        let mut session = RestorationSession::default();
        assert_eq!(session.start(), Err(LifecycleError::NoImage));

        let mut session = ready_session();
        let ticket = session.start().unwrap();
        assert_eq!(ticket.mime_type, "image/jpeg");
        assert_eq!(session.phase(), Phase::InFlight);
        assert_eq!(session.start(), Err(LifecycleError::Busy));
    }

    #[test]
    fn test_inputs_locked_while_in_flight() {
        let mut session = ready_session();
        session.start().unwrap();
        let options = session.options();

        assert_eq!(
            session.toggle(RestorationOption::Upscale),
            Err(LifecycleError::Busy)
        );
        assert_eq!(session.options(), options);
        assert_eq!(
            session.select_image(image("image/png", 10)),
            Err(LifecycleError::Busy)
        );
        assert_eq!(session.source().unwrap().mime_type, "image/jpeg");
        assert_eq!(session.reset(), Err(LifecycleError::Busy));
        assert_eq!(
            session.set_options(RestorationOptions::default()),
            Err(LifecycleError::Busy)
        );
    }

    #[test]
    fn test_no_image_data_returns_to_ready_with_inputs_intact() {
        let mut session = ready_session();
        session.toggle(RestorationOption::Upscale).unwrap();
        session.toggle(RestorationOption::SharpenFace).unwrap();
        let source_before = session.source().cloned();
        let options_before = session.options();

        let ticket = session.start().unwrap();
        assert!(ticket.options.upscale);
        assert!(!ticket.options.sharpen_face);

        session
            .finish(Err("No image data received from Gemini API.".to_string()))
            .unwrap();

        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.error().unwrap().starts_with("No image data received"));
        assert_eq!(session.source().cloned(), source_before);
        assert_eq!(session.options(), options_before);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_blank_failure_uses_generic_message() {
        let mut session = ready_session();
        session.start().unwrap();
        session.finish(Err("  ".to_string())).unwrap();
        assert_eq!(session.error(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn test_retry_after_failure_clears_error() {
        let mut session = ready_session();
        session.start().unwrap();
        session.finish(Err("network down".to_string())).unwrap();
        session.start().unwrap();
        assert!(session.error().is_none());
        session.finish(Ok(restored())).unwrap();
        assert_eq!(session.phase(), Phase::Completed);
    }

    #[test]
    fn test_adjust_settings_keeps_source_and_options() {
        let mut session = ready_session();
        session.toggle(RestorationOption::Colorize).unwrap();
        let source_before = session.source().cloned();
        let options_before = session.options();

        session.start().unwrap();
        session.finish(Ok(restored())).unwrap();
        assert_eq!(session.result(), Some(&restored()));

        session.adjust_settings().unwrap();
        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.result().is_none());
        assert_eq!(session.source().cloned(), source_before);
        assert_eq!(session.options(), options_before);
    }

    #[test]
    fn test_adjust_settings_requires_completed() {
        let mut session = ready_session();
        assert_eq!(session.adjust_settings(), Err(LifecycleError::NotCompleted));
    }

    #[test]
    fn test_finish_requires_in_flight() {
        let mut session = ready_session();
        assert_eq!(
            session.finish(Ok(restored())),
            Err(LifecycleError::NotInFlight)
        );
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn test_reset_discards_source_keeps_options() {
        let mut session = ready_session();
        session.toggle(RestorationOption::Upscale).unwrap();
        session.start().unwrap();
        session.finish(Ok(restored())).unwrap();

        let discarded = session.reset().unwrap();
        assert!(discarded.is_some());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.source().is_none());
        assert!(session.result().is_none());
        assert!(session.options().upscale);
    }

    #[test]
    fn test_data_url() {
        assert_eq!(restored().data_url(), "data:image/png;base64,iVBOR");
    }
}
