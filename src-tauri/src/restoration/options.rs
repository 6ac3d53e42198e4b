//! The five restoration toggles and their canonical order.

use serde::{Deserialize, Serialize};

/// One named restoration operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestorationOption {
    Colorize,
    Denoise,
    FixScratches,
    SharpenFace,
    Upscale,
}

impl RestorationOption {
    /// Canonical order. Task lines in the compiled prompt follow this order.
    pub const ALL: [RestorationOption; 5] = [
        RestorationOption::Colorize,
        RestorationOption::Denoise,
        RestorationOption::FixScratches,
        RestorationOption::SharpenFace,
        RestorationOption::Upscale,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RestorationOption::Colorize => "colorize",
            RestorationOption::Denoise => "denoise",
            RestorationOption::FixScratches => "fix_scratches",
            RestorationOption::SharpenFace => "sharpen_face",
            RestorationOption::Upscale => "upscale",
        }
    }
}

/// Independent boolean flags selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorationOptions {
    pub colorize: bool,
    pub denoise: bool,
    pub fix_scratches: bool,
    pub sharpen_face: bool,
    pub upscale: bool,
}

impl Default for RestorationOptions {
    /// Everything on except upscaling.
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
    /// All flags off.
    pub fn none() -> Self {
        Self {
            colorize: false,
            denoise: false,
            fix_scratches: false,
            sharpen_face: false,
            upscale: false,
        }
    }

    pub fn is_enabled(&self, option: RestorationOption) -> bool {
        match option {
            RestorationOption::Colorize => self.colorize,
            RestorationOption::Denoise => self.denoise,
            RestorationOption::FixScratches => self.fix_scratches,
            RestorationOption::SharpenFace => self.sharpen_face,
            RestorationOption::Upscale => self.upscale,
        }
    }

    pub fn set(&mut self, option: RestorationOption, enabled: bool) {
        let flag = match option {
            RestorationOption::Colorize => &mut self.colorize,
            RestorationOption::Denoise => &mut self.denoise,
            RestorationOption::FixScratches => &mut self.fix_scratches,
            RestorationOption::SharpenFace => &mut self.sharpen_face,
            RestorationOption::Upscale => &mut self.upscale,
        };
        *flag = enabled;
    }

    pub fn toggle(&mut self, option: RestorationOption) {
        let current = self.is_enabled(option);
        self.set(option, !current);
    }

    /// Active flags in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = RestorationOption> + '_ {
        RestorationOption::ALL
            .into_iter()
            .filter(move |o| self.is_enabled(*o))
    }
}
