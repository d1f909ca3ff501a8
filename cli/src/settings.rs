#![deny(missing_docs)]

//! # Rule Settings
//!
//! Command-line and environment overrides layered on top of an optional
//! config file.

use oasfix_core::{AppResult, SettleConfig};
use std::path::{Path, PathBuf};

fn load_config(path: Option<&Path>) -> AppResult<SettleConfig> {
    match path {
        Some(path) => SettleConfig::load(path),
        None => Ok(SettleConfig::default()),
    }
}

/// Rule defaults for the `modify-*` commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// JSON or YAML file with rule defaults.
    #[clap(long, env = "OASFIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Default `minItems` for arrays.
    #[clap(long, env = "OASFIX_MIN_ITEMS")]
    pub min_items: Option<u64>,

    /// Default `minProperties` for open objects.
    #[clap(long, env = "OASFIX_MIN_PROPERTIES")]
    pub min_properties: Option<u64>,

    /// Default `additionalProperties` for schemas with `properties`.
    #[clap(long, env = "OASFIX_ADDITIONAL_PROPERTIES")]
    pub additional_properties: Option<bool>,
}

impl RuleArgs {
    /// Config file values (or defaults) with explicit flags applied on top.
    pub fn resolve(&self) -> AppResult<SettleConfig> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(min_items) = self.min_items {
            config.min_items = min_items;
        }
        if let Some(min_properties) = self.min_properties {
            config.min_properties = min_properties;
        }
        if let Some(additional) = self.additional_properties {
            config.additional_properties = additional;
        }

        Ok(config)
    }
}

/// Path naming settings for the `build` command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// JSON or YAML file; only `noVprefix` is used here.
    #[clap(long, env = "OASFIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fragment stems exempt from the `/v{major}` prefix (comma separated).
    #[clap(long = "no-vprefix", env = "OASFIX_NO_VPREFIX", value_delimiter = ',')]
    pub no_vprefix: Vec<String>,
}

impl PathArgs {
    /// Config file values (or defaults) with `--no-vprefix` applied on top.
    pub fn resolve(&self) -> AppResult<SettleConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if !self.no_vprefix.is_empty() {
            config.no_vprefix = self.no_vprefix.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_flags_override_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oasfix.json");
        fs::write(&path, r#"{"minItems": 4, "minProperties": 2, "noVprefix": ["a"]}"#).unwrap();

        let rules = RuleArgs {
            config: Some(path.clone()),
            min_items: Some(1),
            ..Default::default()
        };
        let config = rules.resolve().unwrap();

        assert_eq!(config.min_items, 1);
        assert_eq!(config.min_properties, 2);
        assert!(!config.additional_properties);
        assert_eq!(config.no_vprefix, vec!["a".to_string()]);

        let paths = PathArgs {
            config: Some(path),
            no_vprefix: vec!["b".to_string()],
        };
        let config = paths.resolve().unwrap();

        assert_eq!(config.min_items, 4);
        assert_eq!(config.no_vprefix, vec!["b".to_string()]);
    }

    #[test]
    fn test_no_file_uses_defaults() {
        assert_eq!(RuleArgs::default().resolve().unwrap(), SettleConfig::default());
        assert_eq!(PathArgs::default().resolve().unwrap(), SettleConfig::default());
    }
}
