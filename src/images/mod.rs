//! Image storage and processing.
//!
//! [`ImageStore`] is the persistence boundary: it resolves client-supplied
//! names to images and writes results back. [`LocalImageStore`] keeps
//! everything in a single flat directory. [`ImageService`] ties a store to
//! the pipeline executor.

mod service;
mod storage;

use std::path::PathBuf;

use image::DynamicImage;
use pf_core::Result;

pub use service::{ImageService, SavedImage};
pub use storage::{generate_name, LocalImageStore};

/// Where images come from and where results go.
pub trait ImageStore: Send + Sync {
    /// Resolve `name` to an existing file.
    ///
    /// Fails with `Validation` for names that are not a single plain file
    /// name, and with `NotFound` if there is no such image.
    fn find(&self, name: &str) -> Result<PathBuf>;

    /// Decode the image stored under `name`.
    fn load(&self, name: &str) -> Result<DynamicImage>;

    /// Encode `image` under `name`, picking the format from the extension,
    /// and return its public URL.
    ///
    /// Only `jpg`, `jpeg` and `png` can be written; anything else fails with
    /// `UnsupportedFormat` before any file is touched.
    fn save(&self, image: &DynamicImage, name: &str) -> Result<String>;

    /// Store raw uploaded bytes under a fresh name and return its URL.
    fn upload(&self, data: &[u8], original_filename: &str) -> Result<String>;

    /// A fresh, unique file name for `prefix` and extension `ext`.
    fn generate_name(&self, prefix: &str, ext: &str) -> Result<String> {
        generate_name(prefix, ext)
    }
}
