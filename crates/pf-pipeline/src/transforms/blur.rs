//! `blur`: Gaussian blur.

use pf_core::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::{required, Transform};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct BlurParams {
    #[validate(required, range(min = 0.1, max = 100.0))]
    pub sigma: Option<f64>,
}

impl BlurParams {
    pub fn new(sigma: f64) -> Self {
        Self { sigma: Some(sigma) }
    }
}

impl Transform for BlurParams {
    const KIND: ActionKind = ActionKind::Blur;

    fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        let sigma = required(Self::KIND, "sigma", self.sigma)?;
        let blurred = state.image().blur(sigma as f32);
        Ok(state.replace_image(blurred))
    }
}
