//! photoforged - HTTP service that runs image action pipelines
//!
//! This library crate exposes the service pieces for integration testing.
//! The pipeline engine itself lives in `pf-pipeline`.

pub mod config;
pub mod images;
pub mod server;
