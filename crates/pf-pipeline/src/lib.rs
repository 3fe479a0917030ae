//! # pf-pipeline
//!
//! The action pipeline engine behind photoforged.
//!
//! This crate provides:
//!
//! - **[`ActionDescriptor`] / [`ProcessRequest`]** -- the untyped request
//!   shapes as they arrive over the wire.
//! - **[`codec`]** -- structural re-coding of an untyped payload into a typed
//!   parameter record.
//! - **[`Transform`]** trait and the built-in [`transforms`] -- one typed
//!   parameter record plus apply function per action kind.
//! - **[`Registry`]** -- the static table from kind string to decoder.
//! - **[`PipelineExecutor`]** -- folds the descriptors over a
//!   [`PipelineState`], stopping at the first failure.

pub mod action;
pub mod codec;
pub mod executor;
pub mod kind;
pub mod registry;
pub mod request;
pub mod state;
pub mod transform;
pub mod transforms;

// Re-export key types at the crate root.
pub use action::Action;
pub use executor::PipelineExecutor;
pub use kind::ActionKind;
pub use registry::{known_action, Entry, Registry};
pub use request::{ActionDescriptor, ProcessRequest, SingleActionRequest};
pub use state::{PipelineOutput, PipelineState};
pub use transform::Transform;
