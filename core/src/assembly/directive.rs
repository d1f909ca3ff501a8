#![deny(missing_docs)]

//! # Sentinel Directives
//!
//! Some string values in a source document are instructions rather than data:
//!
//! - `GHA_CI_MAKE_PATHS_FROM_DIR <relative-dir>`
//! - `GHA_CI_INGEST_FILE_CONTENTS <relative-path> [key=json-value ...]`
//!
//! They are parsed into [`Directive`] once, at the boundary, and dispatched
//! from there.

use crate::error::{AppError, AppResult};
use serde_json::Value;
use std::path::PathBuf;

/// Marker for assembling `paths` from a directory of fragment files.
pub const MAKE_PATHS_FROM_DIR: &str = "GHA_CI_MAKE_PATHS_FROM_DIR";

/// Marker for replacing a value with another file's parsed contents.
pub const INGEST_FILE_CONTENTS: &str = "GHA_CI_INGEST_FILE_CONTENTS";

/// A parsed sentinel directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Build the `paths` mapping from every file in `dir`.
    AssemblePaths {
        /// Directory, relative to the root document.
        dir: PathBuf,
    },
    /// Replace the value with the parsed contents of `path`.
    IngestFile {
        /// File to ingest.
        path: PathBuf,
        /// Keys added to (or replaced in) the ingested mapping, in order.
        overrides: Vec<(String, Value)>,
    },
}

impl Directive {
    /// Returns the marker token of a directive string, if it starts with one.
    pub fn marker(raw: &str) -> Option<&'static str> {
        match raw.split_whitespace().next()? {
            MAKE_PATHS_FROM_DIR => Some(MAKE_PATHS_FROM_DIR),
            INGEST_FILE_CONTENTS => Some(INGEST_FILE_CONTENTS),
            _ => None,
        }
    }

    /// Parses `raw`.
    ///
    /// Ordinary strings yield `Ok(None)`. A recognized marker with a missing
    /// path, stray arguments, or a malformed `key=value` override is an error.
    pub fn parse(raw: &str) -> AppResult<Option<Directive>> {
        let Some(marker) = Self::marker(raw) else {
            return Ok(None);
        };

        let mut parts = raw.split_whitespace().skip(1);
        let target = parts
            .next()
            .ok_or_else(|| AppError::Directive(format!("{marker} requires a path: {raw:?}")))?;

        if marker == MAKE_PATHS_FROM_DIR {
            if let Some(extra) = parts.next() {
                return Err(AppError::Directive(format!(
                    "{marker} takes a single directory, found extra argument {extra:?}"
                )));
            }
            return Ok(Some(Directive::AssemblePaths {
                dir: PathBuf::from(target),
            }));
        }

        let overrides = parts
            .map(parse_override)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Some(Directive::IngestFile {
            path: PathBuf::from(target),
            overrides,
        }))
    }
}

/// Parses a `key=json-value` pair. The value must be valid JSON, so string
/// overrides are written quoted (`name="x"`).
fn parse_override(option: &str) -> AppResult<(String, Value)> {
    let (key, raw_value) = option.split_once('=').ok_or_else(|| {
        AppError::Directive(format!("invalid KEY=value: no `=` found in `{}`", option))
    })?;
    if key.is_empty() {
        return Err(AppError::Directive(format!(
            "invalid KEY=value: empty key in `{}`",
            option
        )));
    }
    let value = serde_json::from_str(raw_value).map_err(|e| {
        AppError::Directive(format!("invalid JSON value for override `{}`: {}", key, e))
    })?;
    Ok((key.to_string(), value))
}
