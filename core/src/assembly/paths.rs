#![deny(missing_docs)]

//! # Path Naming
//!
//! Derives URL path patterns from fragment file names.
//!
//! Path segments are encoded in the file stem with `.` as the delimiter, so
//! `users.{id}.json` describes `/users/{id}`. The stem `root` describes `/`.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::warn;

/// File stem reserved for the `/` path.
pub const ROOT_STEM: &str = "root";

/// Turns fragment file stems into path patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathNaming {
    /// Major API version; when set, patterns get a `/v{major}` prefix.
    pub major_version: Option<u64>,
    /// File stems that never receive the version prefix.
    pub no_vprefix: Vec<String>,
}

impl PathNaming {
    /// Naming policy for the root document `document`.
    pub fn for_document(document: &Value, no_vprefix: &[String]) -> Self {
        Self {
            major_version: major_version_of(document),
            no_vprefix: no_vprefix.to_vec(),
        }
    }

    /// Path pattern for the fragment stem `stem`.
    ///
    /// e.g. `users.{id}` -> `/v2/users/{id}` with major version 2.
    pub fn path_pattern(&self, stem: &str) -> String {
        if stem == ROOT_STEM {
            return "/".to_string();
        }

        let path = format!("/{}", stem.replace('.', "/"));
        match self.major_version {
            Some(major) if !self.no_vprefix.iter().any(|s| s == stem) => {
                format!("/v{major}{path}")
            }
            _ => path,
        }
    }
}

/// Reads the major version from `info.version` (`"2.1.0"` -> `2`).
///
/// A leading `v` is tolerated. Missing or non-numeric versions yield `None`.
pub fn major_version_of(document: &Value) -> Option<u64> {
    let version = document.get("info")?.get("version")?.as_str()?;
    let trimmed = version.trim().trim_start_matches(['v', 'V']);
    let major = trimmed.split('.').next().unwrap_or_default();

    match major.parse::<u64>() {
        Ok(major) => Some(major),
        Err(_) => {
            warn!("Ignoring non-numeric info.version {:?} for path prefixes", version);
            None
        }
    }
}

/// Whether `path` contains a `{name}` template segment.
pub fn is_parameterized(path: &str) -> bool {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    let re = PARAM_RE.get_or_init(|| Regex::new(r"\{([^/{}]+)\}").expect("Invalid regex"));
    re.is_match(path)
}

/// Reorders the top-level `paths` mapping by key. Other values are left alone.
pub fn sort_paths(document: &mut Value) {
    let Some(paths) = document.get_mut("paths").and_then(Value::as_object_mut) else {
        return;
    };

    let mut entries: Vec<(String, Value)> = std::mem::take(paths).into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    *paths = entries.into_iter().collect::<Map<String, Value>>();
}
