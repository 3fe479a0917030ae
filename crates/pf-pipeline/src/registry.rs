//! The transform registry: wire name -> decoder for that kind's record.
//!
//! The table is built once on first use and only read afterwards. Adding a
//! transform means adding a [`Transform`] impl, an [`Action`] variant and one
//! line in [`Registry::builtin`]; the executor stays as it is.

use std::collections::HashMap;
use std::sync::LazyLock;

use pf_core::validation::one_of;
use pf_core::{Error, Result};
use serde_json::Value;
use validator::ValidationError;

use crate::action::Action;
use crate::codec;
use crate::kind::ActionKind;
use crate::transform::Transform;
use crate::transforms::{
    BlurParams, BrightnessParams, ContrastParams, ConvertParams, CropParams, GammaParams,
    ResizeParams, SaturationParams, SharpenParams,
};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::builtin);

/// One registered kind.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    kind: ActionKind,
    decode: fn(&Value) -> Result<Action>,
}

impl Entry {
    fn of<T: Transform>() -> Self {
        Self {
            kind: T::KIND,
            decode: |payload| codec::decode::<T>(T::KIND, payload).map(Into::into),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Decode an untyped payload into this kind's [`Action`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the payload has the wrong shape.
    pub fn decode(&self, payload: &Value) -> Result<Action> {
        (self.decode)(payload)
    }
}

/// Lookup table from action kind string to [`Entry`].
#[derive(Debug)]
pub struct Registry {
    entries: HashMap<&'static str, Entry>,
    names: Vec<&'static str>,
}

impl Registry {
    /// The process-wide registry of built-in transforms.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    fn builtin() -> Self {
        Self::from_entries([
            Entry::of::<CropParams>(),
            Entry::of::<ResizeParams>(),
            Entry::of::<ConvertParams>(),
            Entry::of::<BlurParams>(),
            Entry::of::<GammaParams>(),
            Entry::of::<ContrastParams>(),
            Entry::of::<SharpenParams>(),
            Entry::of::<BrightnessParams>(),
            Entry::of::<SaturationParams>(),
        ])
    }

    fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let entries: HashMap<_, _> = entries
            .into_iter()
            .map(|entry| (entry.kind.as_str(), entry))
            .collect();
        let mut names: Vec<_> = entries.keys().copied().collect();
        names.sort_unstable();
        Self { entries, names }
    }

    /// Look up `kind`. Matching is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAction`] naming `kind` if it is not registered.
    pub fn lookup(&self, kind: &str) -> Result<&Entry> {
        self.entries
            .get(kind)
            .ok_or_else(|| Error::UnknownAction(kind.to_string()))
    }

    /// Registered kind names, sorted.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rule `oneof` over the registered kinds, for use in `#[validate(custom)]`.
pub fn known_action(value: &str) -> std::result::Result<(), ValidationError> {
    one_of(value, Registry::global().names())
}
