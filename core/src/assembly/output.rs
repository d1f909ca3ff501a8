#![deny(missing_docs)]

//! # Document I/O
//!
//! Reading JSON documents from disk and writing them back in the canonical
//! layout: 4-space indentation and a trailing newline.

use crate::error::{AppError, AppResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs;
use std::path::Path;

/// Reads and parses the JSON document at `path`.
pub fn read_document(path: &Path) -> AppResult<Value> {
    if !path.exists() {
        return Err(AppError::General(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        AppError::General(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|source| AppError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Formats `value` with 4-space indentation and a trailing newline.
pub fn to_pretty_json(value: &Value) -> AppResult<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    buf.push(b'\n');

    String::from_utf8(buf).map_err(|e| AppError::General(format!("Invalid UTF-8 output: {}", e)))
}

/// Writes `value` to `path` in the canonical layout.
pub fn write_document(path: &Path, value: &Value) -> AppResult<()> {
    let text = to_pretty_json(value)?;
    fs::write(path, text)
        .map_err(|e| AppError::General(format!("Failed to write {}: {}", path.display(), e)))
}
