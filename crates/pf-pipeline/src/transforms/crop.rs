//! `crop`: cut a rectangle out of the current image.

use pf_core::{Error, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::{required, Transform};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CropParams {
    #[validate(required, range(min = 0))]
    pub x: Option<i64>,
    #[validate(required, range(min = 0))]
    pub y: Option<i64>,
    #[validate(required, range(min = 1))]
    pub width: Option<i64>,
    #[validate(required, range(min = 1))]
    pub height: Option<i64>,
}

impl CropParams {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
        }
    }
}

impl Transform for CropParams {
    const KIND: ActionKind = ActionKind::Crop;

    /// Crops after checking the rectangle against the image *as it is now*,
    /// i.e. after every earlier action in the pipeline has run.
    fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        let x = required(Self::KIND, "x", self.x)?;
        let y = required(Self::KIND, "y", self.y)?;
        let width = required(Self::KIND, "width", self.width)?;
        let height = required(Self::KIND, "height", self.height)?;

        let (image_width, image_height) = (state.image().width(), state.image().height());
        let fits = x >= 0
            && y >= 0
            && x.saturating_add(width) <= i64::from(image_width)
            && y.saturating_add(height) <= i64::from(image_height);
        if !fits {
            return Err(Error::Bounds {
                x,
                y,
                width,
                height,
                image_width,
                image_height,
            });
        }

        // All four values are within 0..=u32 image dimensions here.
        let cropped = state
            .image()
            .crop_imm(x as u32, y as u32, width as u32, height as u32);
        Ok(state.replace_image(cropped))
    }
}
