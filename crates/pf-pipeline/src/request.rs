//! Request shapes as they arrive from clients, before any action is decoded.

use pf_core::validation::not_null;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::registry::known_action;

/// One untyped pipeline step: a kind name plus its raw parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ActionDescriptor {
    #[serde(default)]
    #[validate(length(min = 1, max = 10))]
    pub action: String,
    #[serde(default)]
    #[validate(custom(function = "not_null"))]
    pub params: Value,
}

impl ActionDescriptor {
    pub fn new(action: impl Into<String>, params: Value) -> Self {
        Self {
            action: action.into(),
            params,
        }
    }
}

/// Body of `POST /image/process`.
///
/// Only the top-level rules are checked here; each descriptor is validated
/// by the executor as its step comes up, so a failure can be attributed to
/// the step that caused it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProcessRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub actions: Vec<ActionDescriptor>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub image_name: String,
}

impl ProcessRequest {
    pub fn new(image_name: impl Into<String>, actions: Vec<ActionDescriptor>) -> Self {
        Self {
            actions,
            image_name: image_name.into(),
        }
    }
}

/// Body of `POST /image/{action}`: the image name next to the parameters of
/// that one action, flattened into a single object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct SingleActionRequest {
    /// Taken from the path, not the body.
    #[serde(skip)]
    #[validate(custom(function = "known_action"))]
    pub action: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub image_name: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl SingleActionRequest {
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// The equivalent one-step pipeline request.
    pub fn into_process_request(self) -> ProcessRequest {
        let descriptor = ActionDescriptor::new(self.action, Value::Object(self.params));
        ProcessRequest::new(self.image_name, vec![descriptor])
    }
}
