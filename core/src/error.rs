//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Malformed JSON in a config file, or a value that failed to serialize.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Malformed JSON in the input document at `path`.
    #[from(ignore)]
    #[display("JSON Error in {path}: {source}")]
    Parse {
        /// Offending file.
        path: String,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// Malformed YAML in a configuration file.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A sentinel directive string that could not be parsed.
    /// We ignore this for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("Directive Error: {_0}")]
    Directive(String),

    /// A rule kept matching after the engine's pass cap was exhausted.
    #[from(ignore)]
    #[display("Rule '{rule}' did not reach a fixed point after {passes} passes")]
    NoFixedPoint {
        /// Name of the offending rule.
        rule: String,
        /// Number of passes performed before giving up.
        passes: usize,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
