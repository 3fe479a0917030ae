//! `resize`: scale the image to the requested dimensions.

use image::imageops::FilterType;
use pf_core::{Error, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::kind::ActionKind;
use crate::state::PipelineState;
use crate::transform::{required, Transform};

/// Largest accepted edge, in pixels.
pub const MAX_EDGE: i64 = 8000;

/// A zero on one side keeps the aspect ratio of the current image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ResizeParams {
    #[validate(required, range(min = 0, max = 8000))]
    pub width: Option<i64>,
    #[validate(required, range(min = 0, max = 8000))]
    pub height: Option<i64>,
}

impl ResizeParams {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

impl Transform for ResizeParams {
    const KIND: ActionKind = ActionKind::Resize;

    fn apply(&self, state: PipelineState) -> Result<PipelineState> {
        let width = required(Self::KIND, "width", self.width)?;
        let height = required(Self::KIND, "height", self.height)?;
        if width == 0 && height == 0 {
            return Err(Error::transform(
                Self::KIND,
                "width and height cannot both be 0",
            ));
        }
        if width > MAX_EDGE || height > MAX_EDGE || width < 0 || height < 0 {
            return Err(Error::transform(
                Self::KIND,
                format!("{width}x{height} is outside 0..={MAX_EDGE}"),
            ));
        }

        let (src_w, src_h) = (state.image().width(), state.image().height());
        let (w, h) = target_dimensions(width as u32, height as u32, src_w, src_h);
        if i64::from(w) > MAX_EDGE || i64::from(h) > MAX_EDGE {
            return Err(Error::transform(
                Self::KIND,
                format!("keeping the aspect ratio gives {w}x{h}, outside 0..={MAX_EDGE}"),
            ));
        }
        let resized = state.image().resize_exact(w, h, FilterType::Lanczos3);
        Ok(state.replace_image(resized))
    }
}

/// Fill in a zero side from the source aspect ratio.
fn target_dimensions(width: u32, height: u32, src_w: u32, src_h: u32) -> (u32, u32) {
    let scaled = |num: u32, a: u32, b: u32| -> u32 {
        if b == 0 {
            return 1;
        }
        let value = (f64::from(num) * f64::from(a) / f64::from(b)).round();
        value.clamp(1.0, f64::from(u32::MAX)) as u32
    };
    match (width, height) {
        (0, h) => (scaled(h, src_w, src_h), h),
        (w, 0) => (w, scaled(w, src_h, src_w)),
        (w, h) => (w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::test_support::state;

    #[test]
    fn resizes_exactly() {
        let out = ResizeParams::new(50, 25).apply(state(100, 100)).unwrap();
        assert_eq!((out.image().width(), out.image().height()), (50, 25));
    }

    #[test]
    fn resize_is_idempotent_on_dimensions() {
        let once = ResizeParams::new(40, 30).apply(state(100, 100)).unwrap();
        let twice = ResizeParams::new(40, 30).apply(once).unwrap();
        assert_eq!((twice.image().width(), twice.image().height()), (40, 30));
    }

    #[test]
    fn zero_side_keeps_aspect_ratio() {
        let out = ResizeParams::new(50, 0).apply(state(200, 100)).unwrap();
        assert_eq!((out.image().width(), out.image().height()), (50, 25));

        let out = ResizeParams::new(0, 50).apply(state(200, 100)).unwrap();
        assert_eq!((out.image().width(), out.image().height()), (100, 50));
    }

    #[test]
    fn zero_side_cannot_exceed_max_edge() {
        assert_eq!(target_dimensions(8000, 0, 1, 100), (8000, 800_000));

        let err = ResizeParams::new(50, 0).apply(state(1, 400)).unwrap_err();
        assert!(matches!(err, Error::Transform { ref kind, .. } if kind == "resize"));

        let err = ResizeParams::new(0, 8000).apply(state(100, 1)).unwrap_err();
        assert!(matches!(err, Error::Transform { ref kind, .. } if kind == "resize"));

        let out = ResizeParams::new(80, 0).apply(state(1, 100)).unwrap();
        assert_eq!((out.image().width(), out.image().height()), (80, 8000));
    }

    #[test]
    fn both_zero_is_transform_error() {
        let err = ResizeParams::new(0, 0).apply(state(10, 10)).unwrap_err();
        assert!(matches!(err, Error::Transform { ref kind, .. } if kind == "resize"));
    }

    #[test]
    fn validation_rules() {
        assert!(ResizeParams::new(8000, 0).validate().is_ok());
        assert!(ResizeParams::new(8001, 10).validate().is_err());
        assert!(ResizeParams::new(-1, 10).validate().is_err());
        assert!(ResizeParams::default().validate().is_err());
    }

    #[test]
    fn target_dimensions_never_zero() {
        assert_eq!(target_dimensions(1, 0, 1000, 1), (1, 1));
    }
}
