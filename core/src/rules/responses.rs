#![deny(missing_docs)]

//! # Error Response Injection
//!
//! Forces every `responses` mapping to carry the canonical error body for a
//! given status code.

use crate::engine::Mapping;
use crate::error::AppResult;
use crate::rules::Rule;
use serde_json::{json, Value};
use tracing::debug;

/// Builds the canonical error response body with the given description.
///
/// The body is a JSON object with a required integer `code` and a required
/// string `error`.
pub fn canonical_error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "code": { "description": "http error code", "type": "integer" },
                        "error": { "description": "http error reason", "type": "string" }
                    },
                    "required": ["code", "error"]
                }
            }
        }
    })
}

/// Overwrites `responses[status]` whenever it differs from `body`.
#[derive(Debug, Clone)]
pub struct InjectErrorResponse {
    name: String,
    status: String,
    body: Value,
}

impl InjectErrorResponse {
    /// Builds an injector for an arbitrary status code.
    pub fn new(status: &str, body: Value) -> Self {
        Self {
            name: format!("inject-{status}-response"),
            status: status.to_string(),
            body,
        }
    }

    /// `400` with the "invalid request arguments" body.
    pub fn bad_request() -> Self {
        Self::new("400", canonical_error_response("invalid request arguments"))
    }

    /// `404` with the "not found" body.
    pub fn not_found() -> Self {
        Self::new("404", canonical_error_response("not found"))
    }

    /// The status code this rule injects.
    pub fn status(&self) -> &str {
        &self.status
    }
}

impl Rule for InjectErrorResponse {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, parent: &Mapping, key: &str) -> bool {
        key == "responses"
            && parent[key]
                .as_object()
                .is_some_and(|responses| responses.get(&self.status) != Some(&self.body))
    }

    fn mutate(&self, parent: &mut Mapping, key: &str) -> AppResult<()> {
        if let Some(responses) = parent.get_mut(key).and_then(Value::as_object_mut) {
            debug!("Found responses and setting {}", self.status);
            responses.insert(self.status.clone(), self.body.clone());
        }
        Ok(())
    }
}
