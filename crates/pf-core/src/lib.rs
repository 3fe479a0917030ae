//! pf-core: shared error type, validation helpers and path utilities.
//!
//! This crate is the foundational dependency for the other pf-* crates and
//! for the `photoforged` server, providing:
//!
//! - **Error Handling**: the unified [`Error`] and [`Result`] alias
//! - **Validation**: [`validation::validate`] and the custom rules used by
//!   parameter records
//! - **Path Utilities**: extension normalization and file-name checks

pub mod error;
pub mod paths;
pub mod validation;

pub use error::{Error, Result};
pub use validation::{Violation, Violations};
