//! `brightness`: shift every channel by a percentage of full scale.

use pf_core::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::{required, Transform};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct BrightnessParams {
    #[validate(required, range(min = -100.0, max = 100.0))]
    pub percentage: Option<f64>,
}

impl BrightnessParams {
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage: Some(percentage),
        }
    }
}

impl Transform for BrightnessParams {
    const KIND: ActionKind = ActionKind::Brightness;

    fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        let percentage = required(Self::KIND, "percentage", self.percentage)?;
        let shift = (255.0 * percentage / 100.0).round() as i32;
        let adjusted = state.image().brighten(shift);
        Ok(state.replace_image(adjusted))
    }
}
