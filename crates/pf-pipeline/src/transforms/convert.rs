//! `convert`: change the output format. Pixels are left alone; the new
//! format only takes effect when the result is saved.

use pf_core::validation::lowercase;
use pf_core::{Error, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::Transform;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ConvertParams {
    #[validate(required, length(min = 1, max = 10), custom(function = "lowercase"))]
    pub format: Option<String>,
}

impl ConvertParams {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
        }
    }
}

impl Transform for ConvertParams {
    const KIND: ActionKind = ActionKind::Convert;

    fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        let format = self
            .format
            .as_deref()
            .ok_or_else(|| Error::transform(Self::KIND, "missing format"))?;
        Ok(state.with_target_extension(format))
    }
}
