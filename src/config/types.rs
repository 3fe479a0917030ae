use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout, covering the whole pipeline run
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Body limit for uploads and JSON requests
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8082
}
fn default_request_timeout() -> u64 {
    4
}
fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding uploaded and processed images
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,

    /// Name prefix for pipeline results
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    /// Name prefix for uploads
    #[serde(default = "default_upload_prefix")]
    pub upload_prefix: String,

    /// JPEG encoder quality (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./storage")
}
fn default_output_prefix() -> String {
    "proc".to_string()
}
fn default_upload_prefix() -> String {
    "img".to_string()
}
fn default_jpeg_quality() -> u8 {
    75
}
fn default_true() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            output_prefix: default_output_prefix(),
            upload_prefix: default_upload_prefix(),
            jpeg_quality: default_jpeg_quality(),
            create_if_missing: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub env: LogEnv,
}

/// Deployment environment; picks the log format and default level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEnv {
    /// Pretty, human-readable output at debug level
    #[default]
    Local,
    /// JSON output at debug level
    Dev,
    /// Compact text output at info level
    Prod,
}

impl LogEnv {
    pub fn default_level(self) -> &'static str {
        match self {
            LogEnv::Local | LogEnv::Dev => "debug",
            LogEnv::Prod => "info",
        }
    }
}
