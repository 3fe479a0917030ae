//! The closed set of action kinds.

use std::fmt;

/// One image transformation the pipeline knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Crop,
    Resize,
    Convert,
    Blur,
    Gamma,
    Contrast,
    Sharpen,
    Brightness,
    Saturation,
}

impl ActionKind {
    /// Every kind, in registration order.
    pub const ALL: [ActionKind; 9] = [
        ActionKind::Crop,
        ActionKind::Resize,
        ActionKind::Convert,
        ActionKind::Blur,
        ActionKind::Gamma,
        ActionKind::Contrast,
        ActionKind::Sharpen,
        ActionKind::Brightness,
        ActionKind::Saturation,
    ];

    /// The wire name of this kind, as sent in `"action"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Crop => "crop",
            ActionKind::Resize => "resize",
            ActionKind::Convert => "convert",
            ActionKind::Blur => "blur",
            ActionKind::Gamma => "gamma",
            ActionKind::Contrast => "contrast",
            ActionKind::Sharpen => "sharpen",
            ActionKind::Brightness => "brightness",
            ActionKind::Saturation => "saturation",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
