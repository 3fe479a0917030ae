//! State threaded through a pipeline run.

use image::DynamicImage;
use pf_core::paths::bare_extension;

/// The working image plus the output extension chosen so far.
///
/// Each action consumes the state and hands back a new one, so a failed
/// action leaves nothing half-applied behind.
pub struct PipelineState {
    image: DynamicImage,
    target_extension: String,
}

impl PipelineState {
    /// Start a run on `image`, defaulting the output to `original_extension`.
    pub fn new(image: DynamicImage, original_extension: &str) -> Self {
        Self {
            image,
            target_extension: bare_extension(original_extension),
        }
    }

    /// The current working image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// The current output extension, bare and lowercase (`png`, `jpg`).
    pub fn target_extension(&self) -> &str {
        &self.target_extension
    }

    /// Replace the working image, keeping the target extension.
    pub fn replace_image(self, image: DynamicImage) -> Self {
        Self { image, ..self }
    }

    /// Change the output extension, keeping the image.
    pub fn with_target_extension(mut self, ext: &str) -> Self {
        self.target_extension = bare_extension(ext);
        self
    }

    /// Finish the run.
    ///
    /// An empty target extension falls back to `original_extension`.
    pub fn into_output(self, original_extension: &str) -> PipelineOutput {
        let extension = if self.target_extension.is_empty() {
            bare_extension(original_extension)
        } else {
            self.target_extension
        };
        PipelineOutput {
            image: self.image,
            extension,
        }
    }
}

impl std::fmt::Debug for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineState")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("target_extension", &self.target_extension)
            .finish()
    }
}

/// The result of a successful run: final image and its output extension.
pub struct PipelineOutput {
    pub image: DynamicImage,
    /// Bare, lowercase extension (`png`).
    pub extension: String,
}

impl std::fmt::Debug for PipelineOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineOutput")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("extension", &self.extension)
            .finish()
    }
}
