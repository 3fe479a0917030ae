//! Pipeline executor: folds a list of [`ActionDescriptor`]s over a
//! [`PipelineState`], stopping at the first failing step.

use image::DynamicImage;
use pf_core::validation::{validate, Violations};
use pf_core::{Error, Result};

use crate::action::Action;
use crate::registry::Registry;
use crate::request::ActionDescriptor;
use crate::state::{PipelineOutput, PipelineState};

/// Runs untyped action lists against the transforms of a [`Registry`].
///
/// Each step goes through the same stages, in order:
///
/// 1. the descriptor's own rules (`action` length, `params` present),
/// 2. registry lookup of the kind,
/// 3. decoding the payload into the kind's record,
/// 4. the record's rules,
/// 5. apply.
///
/// A failure in any stage aborts the run with [`Error::Action`] carrying
/// the step index and kind. Earlier steps are not undone, but their output
/// is simply dropped with the state.
#[derive(Debug, Clone, Copy)]
pub struct PipelineExecutor {
    registry: &'static Registry,
}

impl Default for PipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineExecutor {
    /// An executor over the built-in transforms.
    pub fn new() -> Self {
        Self {
            registry: Registry::global(),
        }
    }

    /// Run `actions` on `image`.
    ///
    /// `original_extension` is the extension of the source file; it is used
    /// for the output unless a `convert` step chose another one.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `actions` is empty.
    /// - [`Error::Action`] wrapping the first step failure.
    pub fn execute(
        &self,
        actions: &[ActionDescriptor],
        image: DynamicImage,
        original_extension: &str,
    ) -> Result<PipelineOutput> {
        ensure_not_empty(actions)?;

        let initial = PipelineState::new(image, original_extension);
        let state = actions
            .iter()
            .enumerate()
            .try_fold(initial, |state, (index, descriptor)| {
                self.step(index, descriptor, state).map_err(|e| {
                    tracing::warn!(index, action = %descriptor.action, "Pipeline step failed: {e}");
                    Error::action(index, descriptor.action.as_str(), e)
                })
            })?;

        let output = state.into_output(original_extension);
        tracing::info!(
            steps = actions.len(),
            width = output.image.width(),
            height = output.image.height(),
            extension = %output.extension,
            "Pipeline completed"
        );
        Ok(output)
    }

    /// Decode and validate every step without touching an image.
    ///
    /// Catches everything except crop bounds, which depend on the image.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute), minus apply failures.
    pub fn plan(&self, actions: &[ActionDescriptor]) -> Result<Vec<Action>> {
        ensure_not_empty(actions)?;
        actions
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                self.resolve(descriptor)
                    .map_err(|e| Error::action(index, descriptor.action.as_str(), e))
            })
            .collect()
    }

    fn step(
        &self,
        index: usize,
        descriptor: &ActionDescriptor,
        state: PipelineState,
    ) -> Result<PipelineState> {
        let action = self.resolve(descriptor)?;
        tracing::debug!(index, action = %action.kind(), state = ?state, "Applying action");
        action.apply(state)
    }

    fn resolve(&self, descriptor: &ActionDescriptor) -> Result<Action> {
        validate(descriptor)?;
        let entry = self.registry.lookup(&descriptor.action)?;
        let action = entry.decode(&descriptor.params)?;
        action.validate()?;
        Ok(action)
    }
}

fn ensure_not_empty(actions: &[ActionDescriptor]) -> Result<()> {
    if actions.is_empty() {
        return Err(Error::Validation(Violations::single("actions", "length")));
    }
    Ok(())
}
