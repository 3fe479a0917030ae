//! Image upload and processing routes.
//!
//! Bodies are taken as raw bytes and decoded here rather than through the
//! `Json` extractor so that every failure, including an empty or malformed
//! body, is answered with the same [`ApiResponse`] envelope.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    routing::post,
    Json, Router,
};
use pf_core::Error;
use pf_pipeline::{ProcessRequest, SingleActionRequest};
use serde::de::DeserializeOwned;

use super::{ApiResponse, AppContext, AppError};
use crate::images::SavedImage;

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "image";

/// Create image-related routes.
pub fn image_routes() -> Router<AppContext> {
    Router::new()
        .route("/image", post(upload_image))
        .route("/image/process", post(process_image))
        .route("/image/{action}", post(apply_action))
}

// ============================================================================
// Handlers
// ============================================================================

/// Run a pipeline of actions and save the result under a new name.
async fn process_image(
    State(ctx): State<AppContext>,
    body: Bytes,
) -> Result<Json<ApiResponse>, AppError> {
    let request: ProcessRequest = decode_body(&body)?;
    tracing::debug!(
        image = %request.image_name,
        actions = request.actions.len(),
        "Processing image"
    );

    let saved = render_and_save(&ctx, request).await?;
    Ok(Json(ApiResponse::ok(saved.url)))
}

/// Run a single action, with its parameters inlined next to `image_name`.
async fn apply_action(
    State(ctx): State<AppContext>,
    Path(action): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse>, AppError> {
    let request: SingleActionRequest = decode_body(&body)?;
    let request = ctx.images.single_to_process(request.with_action(action))?;

    let saved = render_and_save(&ctx, request).await?;
    Ok(Json(ApiResponse::ok(saved.url)))
}

/// Accept a JPEG or PNG in the `image` field of a multipart form.
async fn upload_image(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::bad_request(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        upload = Some((filename, data));
        break;
    }

    let Some((filename, data)) = upload else {
        return Err(AppError::bad_request(format!(
            "missing multipart field '{UPLOAD_FIELD}'"
        )));
    };
    if data.is_empty() {
        return Err(AppError::bad_request("empty request"));
    }

    let images = ctx.images.clone();
    let url = run_blocking(move || images.upload(&data, &filename)).await?;
    Ok(Json(ApiResponse::ok(url)))
}

// ============================================================================
// Helpers
// ============================================================================

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::bad_request("empty request"));
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Failed to decode request body: {e}");
        AppError::bad_request("failed to decode request")
    })
}

/// Run the pipeline, then save its result in a second blocking step.
///
/// The save is only scheduled once the pipeline future has resolved, so a
/// request dropped mid-pipeline (client gone, timeout) writes nothing.
async fn render_and_save(ctx: &AppContext, request: ProcessRequest) -> Result<SavedImage, AppError> {
    let images = ctx.images.clone();
    let source = request.image_name.clone();
    let output = run_blocking(move || images.render(&request)).await?;

    let images = ctx.images.clone();
    run_blocking(move || images.save_output(&source, &output)).await
}

/// Run blocking image work off the async runtime.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> pf_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(work))
        .await
        .map_err(|e| Error::Internal(format!("image worker failed: {e}")))?
        .map_err(AppError::from)
}
