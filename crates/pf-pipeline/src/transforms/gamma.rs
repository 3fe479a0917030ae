//! `gamma`: per-channel gamma correction through a lookup table.

use image::DynamicImage;
use pf_core::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::{required, Transform};
use crate::transforms::is_high_depth;

/// `sigma` is the gamma value: above 1 brightens midtones, below 1 darkens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct GammaParams {
    #[validate(required, range(min = 0.1, max = 100.0))]
    pub sigma: Option<f64>,
}

impl GammaParams {
    pub fn new(sigma: f64) -> Self {
        Self { sigma: Some(sigma) }
    }
}

impl Transform for GammaParams {
    const KIND: ActionKind = ActionKind::Gamma;

    /// Output is RGBA, 16-bit for sources deeper than 8 bits and 8-bit
    /// otherwise. Alpha is left untouched.
    fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        let gamma = required(Self::KIND, "sigma", self.sigma)?;

        let image = if is_high_depth(state.image()) {
            let lut = lookup_table(gamma, u16::MAX);
            let mut buf = state.image().to_rgba16();
            for pixel in buf.pixels_mut() {
                for channel in &mut pixel.0[..3] {
                    *channel = lut[usize::from(*channel)];
                }
            }
            DynamicImage::ImageRgba16(buf)
        } else {
            let lut = lookup_table(gamma, u16::from(u8::MAX));
            let mut buf = state.image().to_rgba8();
            for pixel in buf.pixels_mut() {
                for channel in &mut pixel.0[..3] {
                    *channel = lut[usize::from(*channel)] as u8;
                }
            }
            DynamicImage::ImageRgba8(buf)
        };
        Ok(state.replace_image(image))
    }
}

/// Corrected value for every level in `0..=max`.
fn lookup_table(gamma: f64, max: u16) -> Vec<u16> {
    let exponent = 1.0 / gamma;
    let top = f64::from(max);
    (0..=max)
        .map(|i| (top * (f64::from(i) / top).powf(exponent)).round().clamp(0.0, top) as u16)
        .collect()
}
