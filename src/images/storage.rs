//! Flat-directory image storage on the local filesystem.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use pf_core::paths::{dotted_extension, extension_of, is_plain_file_name, is_saveable_extension};
use pf_core::validation::Violations;
use pf_core::{Error, Result};
use uuid::Uuid;

use super::ImageStore;
use crate::config::StorageConfig;

/// Stores every image as `{base_dir}/{name}`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    base_dir: PathBuf,
    jpeg_quality: u8,
    upload_prefix: String,
}

impl LocalImageStore {
    /// Open a store over an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `base_dir` is not a directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.is_dir() {
            return Err(Error::not_found("storage directory", base_dir.display()));
        }
        Ok(Self {
            base_dir,
            jpeg_quality: 75,
            upload_prefix: "img".to_string(),
        })
    }

    /// Open the store described by `config`, creating the directory first
    /// when `create_if_missing` is set.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        if config.create_if_missing {
            std::fs::create_dir_all(&config.path)?;
        }
        Ok(Self::new(&config.path)?
            .with_jpeg_quality(config.jpeg_quality)
            .with_upload_prefix(&config.upload_prefix))
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_upload_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.upload_prefix = prefix.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        if !is_plain_file_name(name) {
            return Err(Error::Validation(Violations::single("image_name", "filename")));
        }
        Ok(self.base_dir.join(name))
    }

    fn encode(&self, image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let encoded = match format {
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel.
                let encoder = JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality);
                DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)
            }
            _ => image.write_to(&mut writer, format),
        };
        encoded.map_err(|e| Error::Internal(format!("failed to encode {}: {e}", path.display())))?;
        writer.flush()?;
        Ok(())
    }
}

impl ImageStore for LocalImageStore {
    fn find(&self, name: &str) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::not_found("image", name))
        }
    }

    fn load(&self, name: &str) -> Result<DynamicImage> {
        let path = self.find(name)?;
        ImageReader::open(&path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| Error::transform("decode", format!("{name}: {e}")))
    }

    fn save(&self, image: &DynamicImage, name: &str) -> Result<String> {
        let path = self.path_for(name)?;
        let format = match extension_of(&path).as_str() {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            other => return Err(Error::UnsupportedFormat(dotted_extension(other))),
        };

        write_or_remove(&path, |path| self.encode(image, path, format))?;

        tracing::debug!(path = %path.display(), "Saved image");
        Ok(public_url(name))
    }

    fn upload(&self, data: &[u8], original_filename: &str) -> Result<String> {
        let sniffed_ext = match image::guess_format(data) {
            Ok(ImageFormat::Jpeg) => "jpg",
            Ok(ImageFormat::Png) => "png",
            Ok(other) => {
                return Err(Error::UnsupportedFormat(format!("{other:?}").to_lowercase()));
            }
            Err(_) => {
                return Err(Error::UnsupportedFormat(
                    "unrecognized image data".to_string(),
                ));
            }
        };

        let ext = extension_of(Path::new(original_filename));
        let ext = if is_saveable_extension(&ext) {
            ext
        } else {
            sniffed_ext.to_string()
        };

        let name = self.generate_name(&self.upload_prefix, &ext)?;
        let path = self.path_for(&name)?;
        write_or_remove(&path, |path| Ok(std::fs::write(path, data)?))?;

        tracing::debug!(path = %path.display(), original = original_filename, "Stored upload");
        Ok(public_url(&name))
    }
}

/// Run `write` against `path`, removing whatever it left there if it fails.
fn write_or_remove(path: &Path, write: impl FnOnce(&Path) -> Result<()>) -> Result<()> {
    let result = write(path);
    if result.is_err() {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), "Failed to remove partial file: {e}");
            }
        }
    }
    result
}

fn public_url(name: &str) -> String {
    format!("/images/{name}")
}

/// Build `{prefix}_{YYYYmmddHHMMSS}_{8 hex}.{ext}`.
///
/// The random suffix keeps names unique when two results land in the same
/// second.
///
/// # Errors
///
/// Returns [`Error::Internal`] if `prefix` or `ext` is empty.
pub fn generate_name(prefix: &str, ext: &str) -> Result<String> {
    let ext = dotted_extension(ext);
    if prefix.is_empty() || ext.is_empty() {
        return Err(Error::Internal(
            "image name prefix and extension must not be empty".to_string(),
        ));
    }
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let token = Uuid::new_v4().simple().to_string();
    Ok(format!("{prefix}_{stamp}_{}{ext}", &token[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn store() -> (TempDir, LocalImageStore) {
        let dir = TempDir::new().unwrap();
        let store = LocalImageStore::new(dir.path()).unwrap();
        (dir, store)
    }

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([10, 20, 30, 128])))
    }

    fn png_bytes() -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        sample().write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn failed_write_leaves_no_file() {
        let (dir, _store) = store();
        let path = dir.path().join("img_partial.png");

        let err = write_or_remove(&path, |path| {
            std::fs::write(path, b"\x89PNG half")?;
            Err(Error::Io {
                source: std::io::Error::other("disk full"),
            })
        })
        .unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn new_requires_existing_dir() {
        let err = LocalImageStore::new("/definitely/not/here").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn from_config_creates_dir() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            path: dir.path().join("nested/images"),
            ..Default::default()
        };
        let store = LocalImageStore::from_config(&config).unwrap();
        assert!(store.base_dir().is_dir());
    }

    #[test]
    fn save_then_load_png() {
        let (_dir, store) = store();
        let url = store.save(&sample(), "out.png").unwrap();
        assert_eq!(url, "/images/out.png");

        let loaded = store.load("out.png").unwrap();
        assert_eq!((loaded.width(), loaded.height()), (8, 6));
    }

    #[test]
    fn save_jpeg_drops_alpha() {
        let (_dir, store) = store();
        store.save(&sample(), "out.jpg").unwrap();
        let loaded = store.load("out.jpg").unwrap();
        assert!(!loaded.color().has_alpha());
    }

    #[test]
    fn save_rejects_unknown_extension() {
        let (dir, store) = store();
        let err = store.save(&sample(), "out.gif").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref ext) if ext == ".gif"));
        assert_eq!(err.http_status(), 415);
        assert!(!dir.path().join("out.gif").exists());
    }

    #[test]
    fn find_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store.find("nope.png").unwrap_err();
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn traversal_is_rejected() {
        let (_dir, store) = store();
        assert!(matches!(
            store.find("../etc/passwd").unwrap_err(),
            Error::Validation(_)
        ));
        assert!(store.save(&sample(), "sub/out.png").is_err());
    }

    #[test]
    fn load_garbage_is_transform_error() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("bad.png"), b"not an image").unwrap();
        assert!(matches!(
            store.load("bad.png").unwrap_err(),
            Error::Transform { .. }
        ));
    }

    #[test]
    fn upload_png() {
        let (dir, store) = store();
        let url = store.upload(&png_bytes(), "holiday.PNG").unwrap();
        let name = url.strip_prefix("/images/").unwrap();
        assert!(name.starts_with("img_"));
        assert!(name.ends_with(".png"));
        assert!(dir.path().join(name).is_file());
    }

    #[test]
    fn upload_without_extension_uses_sniffed_format() {
        let (_dir, store) = store();
        let url = store.upload(&png_bytes(), "blob").unwrap();
        assert!(url.ends_with(".png"));
    }

    #[test]
    fn upload_rejects_non_images() {
        let (_dir, store) = store();
        let err = store.upload(b"GIF89a......", "anim.gif").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        let err = store.upload(b"plain text", "notes.txt").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn generated_names() {
        let a = generate_name("proc", "PNG").unwrap();
        let b = generate_name("proc", ".png").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("proc_") && a.ends_with(".png"));
        // proc_ + 14 digit stamp + _ + 8 hex + .png
        assert_eq!(a.len(), 5 + 14 + 1 + 8 + 4);

        assert!(generate_name("", "png").is_err());
        assert!(generate_name("proc", "").is_err());
    }
}
