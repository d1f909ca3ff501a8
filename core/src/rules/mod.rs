#![deny(missing_docs)]

//! # Rule Library
//!
//! Named normalization policies built on the [`Engine`](crate::engine::Engine).
//! Each rule is a predicate/mutator pair; applying a rule runs the engine to
//! its fixed point, so every rule is idempotent.

use crate::engine::{Engine, Mapping, Settled};
use crate::error::AppResult;
use serde_json::Value;

pub mod ingest;
pub mod pipeline;
pub mod responses;
pub mod schema;

pub use ingest::IngestFileContents;
pub use pipeline::{Pipeline, RuleReport};
pub use responses::{canonical_error_response, InjectErrorResponse};
pub use schema::{
    DefaultAdditionalProperties, DefaultArrayMinItems, DefaultMinProperties, RequireAllProperties,
};

/// A named normalization policy.
pub trait Rule {
    /// Stable, kebab-case rule name used in logs and errors.
    fn name(&self) -> &str;

    /// Predicate half. See [`Predicate`](crate::engine::Predicate).
    fn matches(&self, parent: &Mapping, key: &str) -> bool;

    /// Mutator half. See [`Mutator`](crate::engine::Mutator).
    fn mutate(&self, parent: &mut Mapping, key: &str) -> AppResult<()>;

    /// Runs this rule over `document` until nothing matches.
    fn apply(&self, engine: &Engine, document: &mut Value) -> AppResult<Settled> {
        let predicate = |parent: &Mapping, key: &str| self.matches(parent, key);
        let mutator = |parent: &mut Mapping, key: &str| self.mutate(parent, key);
        engine.apply_named(self.name(), document, &predicate, &mutator)
    }
}
