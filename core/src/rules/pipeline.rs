#![deny(missing_docs)]

//! # Rule Pipelines
//!
//! Ordered rule sequences for the two kinds of fragment files.
//!
//! Order matters: error responses are injected before `additionalProperties`
//! is defaulted, so the injected bodies get closed as well.

use crate::config::SettleConfig;
use crate::engine::Engine;
use crate::error::AppResult;
use crate::rules::{
    DefaultAdditionalProperties, DefaultArrayMinItems, DefaultMinProperties, InjectErrorResponse,
    RequireAllProperties, Rule,
};
use serde_json::Value;
use tracing::debug;

/// Mutations applied by one rule during a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    /// Rule name.
    pub rule: String,
    /// Number of mutations it applied.
    pub mutations: usize,
}

/// An ordered list of rules, each run to its fixed point before the next.
pub struct Pipeline {
    engine: Engine,
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Pipeline {
    /// Empty pipeline driven by `engine`.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            rules: Vec::new(),
        }
    }

    /// Appends `rule`.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Rules for a REST path fragment.
    ///
    /// `inject-404-response` is only included for parameterized paths.
    pub fn rest_path(config: &SettleConfig, parameterized: bool) -> Self {
        let mut pipeline = Self::default().with_rule(InjectErrorResponse::bad_request());
        if parameterized {
            pipeline = pipeline.with_rule(InjectErrorResponse::not_found());
        }
        pipeline.with_schema_defaults(config)
    }

    /// Rules for a database entity schema.
    pub fn db_schema(config: &SettleConfig) -> Self {
        Self::default()
            .with_rule(RequireAllProperties)
            .with_schema_defaults(config)
    }

    fn with_schema_defaults(self, config: &SettleConfig) -> Self {
        self.with_rule(DefaultArrayMinItems {
            default: config.min_items,
        })
        .with_rule(DefaultAdditionalProperties {
            default: config.additional_properties,
        })
        .with_rule(DefaultMinProperties {
            default: config.min_properties,
        })
    }

    /// Rule names in application order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Applies every rule in order.
    pub fn run(&self, document: &mut Value) -> AppResult<Vec<RuleReport>> {
        let mut reports = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let settled = rule.apply(&self.engine, document)?;
            debug!("{}: {} mutation(s)", rule.name(), settled.mutations);
            reports.push(RuleReport {
                rule: rule.name().to_string(),
                mutations: settled.mutations,
            });
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::canonical_error_response;
    use serde_json::json;

    #[test]
    fn test_rest_path_order() {
        let config = SettleConfig::default();
        assert_eq!(
            Pipeline::rest_path(&config, true).rule_names(),
            [
                "inject-400-response",
                "inject-404-response",
                "default-array-minitems",
                "default-additional-properties",
                "default-min-properties",
            ]
        );
        assert!(!Pipeline::rest_path(&config, false)
            .rule_names()
            .contains(&"inject-404-response"));
    }

    #[test]
    fn test_db_schema_order() {
        assert_eq!(
            Pipeline::db_schema(&SettleConfig::default()).rule_names(),
            [
                "require-all-properties",
                "default-array-minitems",
                "default-additional-properties",
                "default-min-properties",
            ]
        );
    }

    #[test]
    fn test_injected_bodies_get_closed() {
        let mut doc = json!({ "get": { "responses": {} } });
        Pipeline::rest_path(&SettleConfig::default(), false)
            .run(&mut doc)
            .unwrap();

        let schema = &doc["get"]["responses"]["400"]["content"]["application/json"]["schema"];
        assert_eq!(schema["additionalProperties"], false);
        assert_ne!(
            doc["get"]["responses"]["400"],
            canonical_error_response("invalid request arguments")
        );
    }

    // Re-running re-injects the (now closed) error bodies and closes them
    // again, so only the resulting document is stable, not the report.
    #[test]
    fn test_second_run_yields_same_document() {
        let mut doc = json!({
            "get": {
                "responses": {
                    "200": {
                        "content": { "application/json": { "schema": {
                            "type": "array",
                            "items": { "type": "object" }
                        } } }
                    }
                }
            }
        });
        let pipeline = Pipeline::rest_path(&SettleConfig::default(), true);

        let first = pipeline.run(&mut doc).unwrap();
        assert!(first.iter().any(|r| r.mutations > 0));

        assert_eq!(doc["get"]["responses"]["200"]["content"]["application/json"]["schema"]["minItems"], 0);

        let snapshot = doc.clone();
        let second = pipeline.run(&mut doc).unwrap();
        let untouched = ["default-array-minitems", "default-min-properties"];
        assert!(second
            .iter()
            .filter(|r| untouched.contains(&r.rule.as_str()))
            .all(|r| r.mutations == 0));
        assert_eq!(doc, snapshot);
    }
}
