//! `sharpen`: unsharp mask with a zero threshold.

use pf_core::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::{required, Transform};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SharpenParams {
    #[validate(required, range(min = 0.1, max = 100.0))]
    pub sigma: Option<f64>,
}

impl SharpenParams {
    pub fn new(sigma: f64) -> Self {
        Self { sigma: Some(sigma) }
    }
}

impl Transform for SharpenParams {
    const KIND: ActionKind = ActionKind::Sharpen;

    fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        let sigma = required(Self::KIND, "sigma", self.sigma)?;
        let sharpened = state.image().unsharpen(sigma as f32, 0);
        Ok(state.replace_image(sharpened))
    }
}
