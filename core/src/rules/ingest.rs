#![deny(missing_docs)]

//! # File Ingestion Rule
//!
//! Replaces `GHA_CI_INGEST_FILE_CONTENTS` directive strings with the parsed
//! contents of the referenced file. Because the engine restarts after each
//! replacement, directives inside ingested files are resolved too.

use crate::assembly::directive::{Directive, INGEST_FILE_CONTENTS};
use crate::assembly::output::read_document;
use crate::engine::Mapping;
use crate::error::{AppError, AppResult};
use crate::rules::Rule;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Inlines referenced files, resolving their paths against `base_dir`.
#[derive(Debug, Clone)]
pub struct IngestFileContents {
    base_dir: PathBuf,
}

impl IngestFileContents {
    /// Creates the rule. Relative directive paths are joined onto `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl Rule for IngestFileContents {
    fn name(&self) -> &str {
        "ingest-file-contents"
    }

    fn matches(&self, parent: &Mapping, key: &str) -> bool {
        parent[key]
            .as_str()
            .is_some_and(|raw| Directive::marker(raw) == Some(INGEST_FILE_CONTENTS))
    }

    fn mutate(&self, parent: &mut Mapping, key: &str) -> AppResult<()> {
        let raw = parent[key].as_str().unwrap_or_default().to_string();

        let Some(Directive::IngestFile { path, overrides }) = Directive::parse(&raw)? else {
            return Err(AppError::Directive(format!(
                "expected {INGEST_FILE_CONTENTS} directive, found {raw:?}"
            )));
        };

        let full_path = self.base_dir.join(&path);
        debug!("Ingesting {} into '{}'", full_path.display(), key);
        let mut contents = read_document(&full_path)?;

        if !overrides.is_empty() {
            let target = contents.as_object_mut().ok_or_else(|| {
                AppError::Directive(format!(
                    "cannot apply overrides to non-object contents of {}",
                    full_path.display()
                ))
            })?;
            for (name, value) in overrides {
                target.insert(name, value);
            }
        }

        parent.insert(key.to_string(), contents);
        Ok(())
    }
}
