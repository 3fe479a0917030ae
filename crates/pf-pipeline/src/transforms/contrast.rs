//! `contrast`: stretch or flatten channel values around the midpoint.

use pf_core::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::{required, Transform};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContrastParams {
    #[validate(required, range(min = -100.0, max = 100.0))]
    pub percentage: Option<f64>,
}

impl ContrastParams {
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage: Some(percentage),
        }
    }
}

impl Transform for ContrastParams {
    const KIND: ActionKind = ActionKind::Contrast;

    fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        let percentage = required(Self::KIND, "percentage", self.percentage)?;
        let adjusted = state.image().adjust_contrast(percentage as f32);
        Ok(state.replace_image(adjusted))
    }
}
