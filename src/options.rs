//! Restoration toggles as shown in the UI.
//!
//! Field names match the backend `RestorationOptions` so the struct crosses
//! the Tauri bridge unchanged.

use serde::{Deserialize, Serialize};

/// Preference key under which the last used options are stored.
pub const OPTIONS_PREFERENCE_KEY: &str = "restoration_options";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestorationOption {
    Colorize,
    Denoise,
    FixScratches,
    SharpenFace,
    Upscale,
}

impl RestorationOption {
    /// Canonical order, also the order of the cards on screen.
    pub const ALL: [RestorationOption; 5] = [
        RestorationOption::Colorize,
        RestorationOption::Denoise,
        RestorationOption::FixScratches,
        RestorationOption::SharpenFace,
        RestorationOption::Upscale,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            RestorationOption::Colorize => "Color Restoration",
            RestorationOption::Denoise => "Denoise & Smooth",
            RestorationOption::FixScratches => "Physical Repair",
            RestorationOption::SharpenFace => "Face Enhancement",
            RestorationOption::Upscale => "2x Upscaling",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RestorationOption::Colorize => "Realistic AI colorization for B&W photos",
            RestorationOption::Denoise => "Remove grain and noise, enhance clarity",
            RestorationOption::FixScratches => "Remove scratches, creases, and tears",
            RestorationOption::SharpenFace => "Restore facial details (Super-Resolution)",
            RestorationOption::Upscale => "Increase resolution and detail density",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorationOptions {
    pub colorize: bool,
    pub denoise: bool,
    pub fix_scratches: bool,
    pub sharpen_face: bool,
    pub upscale: bool,
}

impl Default for RestorationOptions {
    fn default() -> Self {
        Self {
            colorize: true,
            denoise: true,
            fix_scratches: true,
            sharpen_face: true,
            upscale: false,
        }
    }
}

impl RestorationOptions {
    pub fn is_enabled(&self, option: RestorationOption) -> bool {
        match option {
            RestorationOption::Colorize => self.colorize,
            RestorationOption::Denoise => self.denoise,
            RestorationOption::FixScratches => self.fix_scratches,
            RestorationOption::SharpenFace => self.sharpen_face,
            RestorationOption::Upscale => self.upscale,
        }
    }

    /// Flip exactly one flag.
    pub fn toggle(&mut self, option: RestorationOption) {
        let flag = match option {
            RestorationOption::Colorize => &mut self.colorize,
            RestorationOption::Denoise => &mut self.denoise,
            RestorationOption::FixScratches => &mut self.fix_scratches,
            RestorationOption::SharpenFace => &mut self.sharpen_face,
            RestorationOption::Upscale => &mut self.upscale,
        };
        *flag = !*flag;
    }

    /// Parse a stored preference, falling back to defaults.
    pub fn from_preference(value: Option<&str>) -> Self {
        value
            .and_then(|v| serde_json::from_str(v).ok())
            .unwrap_or_default()
    }

    pub fn to_preference(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_leaves_upscale_off() {
        let opts = RestorationOptions::default();
        let enabled: Vec<_> = RestorationOption::ALL
            .iter()
            .filter(|o| opts.is_enabled(**o))
            .collect();
        assert_eq!(enabled.len(), 4);
        assert!(!opts.upscale);
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut opts = RestorationOptions::default();
        opts.toggle(RestorationOption::Upscale);
        opts.toggle(RestorationOption::SharpenFace);
        assert_eq!(
            opts,
            RestorationOptions {
                colorize: true,
                denoise: true,
                fix_scratches: true,
                sharpen_face: false,
                upscale: true,
            }
        );
    }

    #[test]
    fn test_preference_round_trip_and_fallback() {
        let mut opts = RestorationOptions::default();
        opts.toggle(RestorationOption::Colorize);
        let stored = opts.to_preference();
        assert_eq!(RestorationOptions::from_preference(Some(&stored)), opts);

        assert_eq!(
            RestorationOptions::from_preference(Some("{broken")),
            RestorationOptions::default()
        );
        assert_eq!(
            RestorationOptions::from_preference(None),
            RestorationOptions::default()
        );
    }

    #[test]
    fn test_titles_present_for_all() {
        for option in RestorationOption::ALL {
            assert!(!option.title().is_empty());
            assert!(!option.description().is_empty());
        }
    }
}
