#![deny(missing_docs)]

//! # Configuration
//!
//! Default values written by the schema rules and the version-prefix
//! exemptions used when assembling paths. Loadable from JSON or YAML.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Normalization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SettleConfig {
    /// Written to `minItems` on arrays lacking one.
    pub min_items: u64,
    /// Written to `minProperties` on open objects lacking one.
    pub min_properties: u64,
    /// Written to `additionalProperties` on schemas declaring `properties`.
    pub additional_properties: bool,
    /// Fragment stems that never get a `/v{major}` prefix.
    pub no_vprefix: Vec<String>,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            min_items: 0,
            min_properties: 0,
            additional_properties: false,
            no_vprefix: Vec::new(),
        }
    }
}

impl SettleConfig {
    /// Loads a config file. `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON. Absent keys keep their defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::General(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");

        if is_yaml {
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }
}
