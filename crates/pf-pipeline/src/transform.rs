//! The [`Transform`] trait implemented by every built-in action.

use pf_core::{Error, Result};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::action::Action;
use crate::kind::ActionKind;
use crate::state::PipelineState;

/// A typed parameter record that knows how to apply itself to the pipeline
/// state.
///
/// Fields are `Option`s so that a field missing from the payload decodes
/// cleanly and is then reported by the `required` rule during validation.
/// [`apply`](Transform::apply) may therefore assume `validate` has passed.
pub trait Transform: DeserializeOwned + Validate + std::fmt::Debug + Into<Action> {
    /// The kind this record is registered under.
    const KIND: ActionKind;

    /// Apply the transform, consuming the state and returning the next one.
    fn apply(&self, state: PipelineState) -> Result<PipelineState>;
}

/// Unwrap a `required` field inside `apply`.
pub(crate) fn required<T: Copy>(kind: ActionKind, field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::transform(kind, format!("missing {field}")))
}
