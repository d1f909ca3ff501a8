#![deny(missing_docs)]

//! # oasfix Core
//!
//! Fixed-point tree mutation engine and the OpenAPI normalization rules built
//! on it.

/// Shared error types.
pub mod error;

/// Restart-based traversal engine.
pub mod engine;

/// Normalization rules and pipelines.
pub mod rules;

/// Directive parsing, path naming and document I/O.
pub mod assembly;

/// Rule defaults and path-prefix settings.
pub mod config;

pub use assembly::{Directive, PathNaming};
pub use config::SettleConfig;
pub use engine::{apply, Engine, Mapping, Mutator, Predicate, Settled};
pub use error::{AppError, AppResult};
pub use rules::{Pipeline, Rule, RuleReport};
