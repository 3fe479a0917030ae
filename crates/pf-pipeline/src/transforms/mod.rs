//! Built-in transforms, one module per action kind.
//!
//! Every record here implements [`Transform`](crate::Transform); the
//! [`Registry`](crate::Registry) maps wire names onto them.

pub mod blur;
pub mod brightness;
pub mod contrast;
pub mod convert;
pub mod crop;
pub mod gamma;
pub mod resize;
pub mod saturation;
pub mod sharpen;

pub use blur::BlurParams;
pub use brightness::BrightnessParams;
pub use contrast::ContrastParams;
pub use convert::ConvertParams;
pub use crop::CropParams;
pub use gamma::GammaParams;
pub use resize::ResizeParams;
pub use saturation::SaturationParams;
pub use sharpen::SharpenParams;

use image::DynamicImage;

/// More than 8 bits per channel.
pub(crate) fn is_high_depth(image: &DynamicImage) -> bool {
    let color = image.color();
    color.bytes_per_pixel() > color.channel_count()
}
