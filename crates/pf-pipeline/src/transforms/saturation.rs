//! `saturation`: move each pixel towards or away from its grey value.

use image::{DynamicImage, Rgba};
use pf_core::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::{required, Transform};
use crate::transforms::is_high_depth;

/// `-100` yields greyscale, `0` leaves the image unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SaturationParams {
    #[validate(required, range(min = -100.0, max = 100.0))]
    pub percentage: Option<f64>,
}

impl SaturationParams {
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage: Some(percentage),
        }
    }
}

impl Transform for SaturationParams {
    const KIND: ActionKind = ActionKind::Saturation;

    /// Output is RGBA, 16-bit for sources deeper than 8 bits and 8-bit
    /// otherwise.
    fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        let percentage = required(Self::KIND, "percentage", self.percentage)?;
        let factor = 1.0 + percentage / 100.0;

        let image = if is_high_depth(state.image()) {
            let top = f64::from(u16::MAX);
            let mut buf = state.image().to_rgba16();
            for pixel in buf.pixels_mut() {
                let [r, g, b, a] = pixel.0;
                let [r, g, b] = saturate([r, g, b].map(f64::from), factor, top);
                *pixel = Rgba([r as u16, g as u16, b as u16, a]);
            }
            DynamicImage::ImageRgba16(buf)
        } else {
            let top = f64::from(u8::MAX);
            let mut buf = state.image().to_rgba8();
            for pixel in buf.pixels_mut() {
                let [r, g, b, a] = pixel.0;
                let [r, g, b] = saturate([r, g, b].map(f64::from), factor, top);
                *pixel = Rgba([r as u8, g as u8, b as u8, a]);
            }
            DynamicImage::ImageRgba8(buf)
        };
        Ok(state.replace_image(image))
    }
}

/// Mix each channel with the Rec.601 luma, rounded into `0..=top`.
fn saturate(rgb: [f64; 3], factor: f64, top: f64) -> [f64; 3] {
    let [r, g, b] = rgb;
    let luma = 0.299 * r + 0.587 * g + 0.114 * b;
    rgb.map(|c| (luma + (c - luma) * factor).round().clamp(0.0, top))
}
