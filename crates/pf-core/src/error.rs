//! Unified error type for photoforged.
//!
//! Every layer (store, pipeline, HTTP handlers) funnels its failures into
//! [`Error`], which carries enough structure for callers to tell the failure
//! categories apart and for the server to derive a status code via
//! [`Error::http_status`].

use std::fmt;

use crate::validation::Violations;

/// Unified error type covering all failure modes in photoforged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "image").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The request body could not be read as a request at all.
    #[error("{0}")]
    BadRequest(String),

    /// A field is present but violates a declared rule.
    #[error("{0}")]
    Validation(Violations),

    /// An action payload does not have the shape its kind requires.
    #[error("invalid {kind} params: {message}")]
    Decode {
        /// The action kind the payload was decoded for.
        kind: String,
        /// Decoder message.
        message: String,
    },

    /// The action kind is not registered.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// A crop rectangle does not fit the image it is applied to.
    #[error(
        "crop area {width}x{height}+{x}+{y} exceeds image boundaries {image_width}x{image_height}"
    )]
    Bounds {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        image_width: u32,
        image_height: u32,
    },

    /// The underlying image library failed.
    #[error("{kind} failed: {message}")]
    Transform {
        /// The transform (or store operation) that failed.
        kind: String,
        /// Human-readable error description.
        message: String,
    },

    /// The store cannot encode images with this extension.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// One step of a pipeline failed.
    #[error("failed to perform action {index} ({action}): {source}")]
    Action {
        /// Zero-based position of the failing action.
        index: usize,
        /// The action kind as it was sent by the client.
        action: String,
        /// The specific failure.
        source: Box<Error>,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::BadRequest(_) => 400,
            Error::Validation(_) => 400,
            Error::Decode { .. } => 400,
            Error::UnknownAction(_) => 400,
            Error::Bounds { .. } => 400,
            Error::Transform { .. } => 400,
            Error::UnsupportedFormat(_) => 415,
            Error::Io { .. } => 500,
            Error::Action { source, .. } => source.http_status(),
            Error::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for this error's category.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "not_found",
            Error::BadRequest(_) => "bad_request",
            Error::Validation(_) => "validation_error",
            Error::Decode { .. } => "decode_error",
            Error::UnknownAction(_) => "unknown_action",
            Error::Bounds { .. } => "bounds_error",
            Error::Transform { .. } => "transform_error",
            Error::UnsupportedFormat(_) => "unsupported_format",
            Error::Io { .. } => "io_error",
            Error::Action { source, .. } => source.code(),
            Error::Internal(_) => "internal_error",
        }
    }

    /// The innermost error, looking through [`Error::Action`] wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Action { source, .. } => source.root(),
            other => other,
        }
    }

    /// Index and kind of the failing action, if this is a pipeline failure.
    pub fn failed_action(&self) -> Option<(usize, &str)> {
        match self {
            Error::Action { index, action, .. } => Some((*index, action.as_str())),
            _ => None,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Decode`].
    pub fn decode(kind: impl fmt::Display, message: impl Into<String>) -> Self {
        Error::Decode {
            kind: kind.to_string(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Transform`].
    pub fn transform(kind: impl fmt::Display, message: impl Into<String>) -> Self {
        Error::Transform {
            kind: kind.to_string(),
            message: message.into(),
        }
    }

    /// Wrap `source` as the failure of action `index`.
    pub fn action(index: usize, action: impl Into<String>, source: Error) -> Self {
        Error::Action {
            index,
            action: action.into(),
            source: Box::new(source),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Error::Validation(errors.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = Error::not_found("image", "cat.png");
        assert_eq!(err.to_string(), "image not found: cat.png");
        assert_eq!(err.http_status(), 404);
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn validation_display() {
        let err = Error::Validation(Violations::single("sigma", "range"));
        assert_eq!(err.to_string(), "field sigma is not valid (range)");
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn decode_names_kind() {
        let err = Error::decode("resize", "invalid type: string \"a\", expected i64");
        assert!(err.to_string().starts_with("invalid resize params"));
        assert_eq!(err.code(), "decode_error");
    }

    #[test]
    fn bounds_display() {
        let err = Error::Bounds {
            x: 90,
            y: 90,
            width: 50,
            height: 50,
            image_width: 100,
            image_height: 100,
        };
        assert_eq!(
            err.to_string(),
            "crop area 50x50+90+90 exceeds image boundaries 100x100"
        );
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn unsupported_format_is_415() {
        let err = Error::UnsupportedFormat(".gif".into());
        assert_eq!(err.http_status(), 415);
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn action_delegates_to_source() {
        let err = Error::action(2, "rotate", Error::UnknownAction("rotate".into()));
        assert_eq!(
            err.to_string(),
            "failed to perform action 2 (rotate): unknown action: rotate"
        );
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.code(), "unknown_action");
        assert_eq!(err.failed_action(), Some((2, "rotate")));
        assert!(matches!(err.root(), Error::UnknownAction(kind) if kind == "rotate"));
    }

    #[test]
    fn root_of_plain_error_is_itself() {
        let err = Error::Internal("boom".into());
        assert!(matches!(err.root(), Error::Internal(_)));
        assert_eq!(err.failed_action(), None);
    }

    #[test]
    fn result_alias() {
        fn ok_fn() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(ok_fn().unwrap(), 42);

        fn err_fn() -> Result<i32> {
            Err(Error::Internal("boom".into()))
        }
        assert!(err_fn().is_err());
    }
}
