//! Image service: load -> pipeline -> name -> save.

use std::sync::Arc;

use pf_core::paths::extension_of;
use pf_core::validation::validate;
use pf_core::Result;
use pf_pipeline::{PipelineExecutor, PipelineOutput, ProcessRequest, SingleActionRequest};

use super::ImageStore;
use crate::config::StorageConfig;

/// Where a pipeline result ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// File name inside the store.
    pub name: String,
    /// Public URL, `/images/{name}`.
    pub url: String,
}

/// Runs pipelines against images held by an [`ImageStore`].
///
/// All methods are blocking; async callers should run them on a blocking
/// thread.
pub struct ImageService {
    store: Arc<dyn ImageStore>,
    executor: PipelineExecutor,
    output_prefix: String,
}

impl ImageService {
    pub fn new(store: Arc<dyn ImageStore>, config: &StorageConfig) -> Self {
        Self {
            store,
            executor: PipelineExecutor::new(),
            output_prefix: config.output_prefix.clone(),
        }
    }

    pub fn store(&self) -> &dyn ImageStore {
        self.store.as_ref()
    }

    /// Apply `request.actions` to `request.image_name` and save the result
    /// under a freshly generated name.
    ///
    /// Nothing is written unless every action succeeded.
    ///
    /// # Errors
    ///
    /// - `Validation` if the request itself breaks its rules.
    /// - `NotFound` if the source image does not exist.
    /// - `Action` wrapping the first failing step.
    /// - `UnsupportedFormat` if the final extension cannot be encoded.
    pub fn process(&self, request: &ProcessRequest) -> Result<SavedImage> {
        let output = self.render(request)?;
        self.save_output(&request.image_name, &output)
    }

    /// Load the source and run the pipeline without touching the store.
    pub fn render(&self, request: &ProcessRequest) -> Result<PipelineOutput> {
        validate(request)?;

        let source = self.store.find(&request.image_name)?;
        let original_extension = extension_of(&source);
        let image = self.store.load(&request.image_name)?;

        let output = self
            .executor
            .execute(&request.actions, image, &original_extension)?;
        tracing::debug!(
            source = %request.image_name,
            actions = request.actions.len(),
            extension = %output.extension,
            "Pipeline finished"
        );
        Ok(output)
    }

    /// Save a finished pipeline result under a fresh name.
    pub fn save_output(&self, source: &str, output: &PipelineOutput) -> Result<SavedImage> {
        let name = self
            .store
            .generate_name(&self.output_prefix, &output.extension)?;
        let url = self.store.save(&output.image, &name)?;

        tracing::info!(%source, %url, "Processed image");
        Ok(SavedImage { name, url })
    }

    /// Run a single action given in the flattened per-kind request form.
    pub fn apply_single(&self, request: SingleActionRequest) -> Result<SavedImage> {
        let request = self.single_to_process(request)?;
        self.process(&request)
    }

    /// Check the flattened form and turn it into a one-step pipeline.
    pub fn single_to_process(&self, request: SingleActionRequest) -> Result<ProcessRequest> {
        validate(&request)?;
        Ok(request.into_process_request())
    }

    /// Store an uploaded file and return its URL.
    pub fn upload(&self, data: &[u8], original_filename: &str) -> Result<String> {
        let url = self.store.upload(data, original_filename)?;
        tracing::info!(original = original_filename, bytes = data.len(), %url, "Stored upload");
        Ok(url)
    }
}
