//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which points a default [`Config`] at a fresh
//! temporary storage directory and builds the full [`AppContext`] on it.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use photoforged::config::Config;
use photoforged::images::{ImageStore, LocalImageStore};
use photoforged::server::{create_router, ApiResponse, AppContext};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "photoforged-test-boundary";

/// Test harness wrapping an [`AppContext`] backed by a temporary directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Use `config`, with its storage path replaced by a temporary directory.
    pub fn with_config(mut config: Config) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        config.storage.path = dir.path().to_path_buf();
        let ctx = AppContext::from_config(config).expect("failed to build context");
        Self { ctx, dir }
    }

    /// Like [`TestHarness::with_config`], but every image load blocks for
    /// `delay` first.
    pub fn with_slow_loads(mut config: Config, delay: Duration) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        config.storage.path = dir.path().to_path_buf();
        let inner = LocalImageStore::from_config(&config.storage).expect("failed to open store");
        let ctx = AppContext::with_store(config, Arc::new(SlowStore { inner, delay }));
        Self { ctx, dir }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    /// Write a `width`x`height` gradient image named `name` into storage.
    pub fn add_image(&self, name: &str, width: u32, height: u32) {
        let path = self.dir.path().join(name);
        let format = ImageFormat::from_path(&path).expect("fixture needs a known extension");
        let image = gradient(width, height);
        let image = if format == ImageFormat::Jpeg {
            DynamicImage::ImageRgb8(image.to_rgb8())
        } else {
            image
        };
        image.save_with_format(&path, format).expect("failed to write fixture");
    }

    pub fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    /// Number of files currently in storage.
    pub fn file_count(&self) -> usize {
        std::fs::read_dir(self.dir.path()).unwrap().count()
    }

    /// Open a stored image by the URL returned from the API.
    pub fn open_url(&self, url: &str) -> DynamicImage {
        let name = url.strip_prefix("/images/").expect("unexpected url");
        image::open(self.dir.path().join(name)).expect("failed to open result")
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, ApiResponse) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, ApiResponse) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let envelope = serde_json::from_slice(&bytes)
            .unwrap_or_else(|e| panic!("not an envelope ({e}): {:?}", bytes));
        (status, envelope)
    }
}

/// Store whose loads take at least `delay`.
struct SlowStore {
    inner: LocalImageStore,
    delay: Duration,
}

impl ImageStore for SlowStore {
    fn find(&self, name: &str) -> pf_core::Result<PathBuf> {
        self.inner.find(name)
    }

    fn load(&self, name: &str) -> pf_core::Result<DynamicImage> {
        std::thread::sleep(self.delay);
        self.inner.load(name)
    }

    fn save(&self, image: &DynamicImage, name: &str) -> pf_core::Result<String> {
        self.inner.save(image, name)
    }

    fn upload(&self, data: &[u8], original_filename: &str) -> pf_core::Result<String> {
        self.inner.upload(data, original_filename)
    }
}

pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, 255])
    }))
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    gradient(width, height)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// A `multipart/form-data` body with a single file field.
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::post("/image")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
