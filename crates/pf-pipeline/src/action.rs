//! The [`Action`] sum type: one decoded, typed step of a pipeline.

use pf_core::validation::validate;
use pf_core::Result;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::Transform;
use crate::transforms::{
    BlurParams, BrightnessParams, ContrastParams, ConvertParams, CropParams, GammaParams,
    ResizeParams, SaturationParams, SharpenParams,
};

/// A decoded action. Each variant wraps the parameter record of its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Crop(CropParams),
    Resize(ResizeParams),
    Convert(ConvertParams),
    Blur(BlurParams),
    Gamma(GammaParams),
    Contrast(ContrastParams),
    Sharpen(SharpenParams),
    Brightness(BrightnessParams),
    Saturation(SaturationParams),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Crop(_) => CropParams::KIND,
            Action::Resize(_) => ResizeParams::KIND,
            Action::Convert(_) => ConvertParams::KIND,
            Action::Blur(_) => BlurParams::KIND,
            Action::Gamma(_) => GammaParams::KIND,
            Action::Contrast(_) => ContrastParams::KIND,
            Action::Sharpen(_) => SharpenParams::KIND,
            Action::Brightness(_) => BrightnessParams::KIND,
            Action::Saturation(_) => SaturationParams::KIND,
        }
    }

    /// Run the structural rules of the wrapped record.
    ///
    /// # Errors
    ///
    /// Returns [`pf_core::Error::Validation`] listing every violated rule.
    pub fn validate(&self) -> Result<()> {
        match self {
            Action::Crop(p) => validate(p),
            Action::Resize(p) => validate(p),
            Action::Convert(p) => validate(p),
            Action::Blur(p) => validate(p),
            Action::Gamma(p) => validate(p),
            Action::Contrast(p) => validate(p),
            Action::Sharpen(p) => validate(p),
            Action::Brightness(p) => validate(p),
            Action::Saturation(p) => validate(p),
        }
    }

    /// Apply the wrapped transform. Callers run [`validate`](Self::validate)
    /// first.
    pub fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        match self {
            Action::Crop(p) => p.apply(state),
            Action::Resize(p) => p.apply(state),
            Action::Convert(p) => p.apply(state),
            Action::Blur(p) => p.apply(state),
            Action::Gamma(p) => p.apply(state),
            Action::Contrast(p) => p.apply(state),
            Action::Sharpen(p) => p.apply(state),
            Action::Brightness(p) => p.apply(state),
            Action::Saturation(p) => p.apply(state),
        }
    }
}

macro_rules! impl_from_params {
    ($($variant:ident($params:ty)),* $(,)?) => {
        $(
            impl From<$params> for Action {
                fn from(params: $params) -> Self {
                    Action::$variant(params)
                }
            }
        )*
    };
}

impl_from_params!(
    Crop(CropParams),
    Resize(ResizeParams),
    Convert(ConvertParams),
    Blur(BlurParams),
    Gamma(GammaParams),
    Contrast(ContrastParams),
    Sharpen(SharpenParams),
    Brightness(BrightnessParams),
    Saturation(SaturationParams),
);
