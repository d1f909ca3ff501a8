#![deny(missing_docs)]

//! # Schema Defaulting Rules
//!
//! Tighten JSON Schema objects and arrays: require every declared property,
//! close objects that declare properties, and give arrays and open objects a
//! minimum size.

use crate::engine::Mapping;
use crate::error::AppResult;
use crate::rules::Rule;
use serde_json::Value;
use tracing::debug;

/// Sets `required` to the exact, ordered list of `properties` names.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireAllProperties;

impl RequireAllProperties {
    fn property_names(parent: &Mapping) -> Option<Vec<Value>> {
        let properties = parent.get("properties")?.as_object()?;
        Some(properties.keys().cloned().map(Value::String).collect())
    }
}

impl Rule for RequireAllProperties {
    fn name(&self) -> &str {
        "require-all-properties"
    }

    fn matches(&self, parent: &Mapping, key: &str) -> bool {
        if key != "properties" {
            return false;
        }
        match Self::property_names(parent) {
            Some(names) => parent.get("required").and_then(Value::as_array) != Some(&names),
            None => false,
        }
    }

    fn mutate(&self, parent: &mut Mapping, _key: &str) -> AppResult<()> {
        debug!("Found properties and setting all as required");
        if let Some(names) = Self::property_names(parent) {
            parent.insert("required".to_string(), Value::Array(names));
        }
        Ok(())
    }
}

/// Adds `minItems` to every `"type": "array"` schema lacking one.
#[derive(Debug, Clone, Copy)]
pub struct DefaultArrayMinItems {
    /// Value written to `minItems`.
    pub default: u64,
}

impl Rule for DefaultArrayMinItems {
    fn name(&self) -> &str {
        "default-array-minitems"
    }

    fn matches(&self, parent: &Mapping, key: &str) -> bool {
        key == "type" && parent[key] == "array" && !parent.contains_key("minItems")
    }

    fn mutate(&self, parent: &mut Mapping, _key: &str) -> AppResult<()> {
        debug!("Found array and setting minItems={}", self.default);
        parent.insert("minItems".to_string(), Value::from(self.default));
        Ok(())
    }
}

/// Adds `additionalProperties` to every schema declaring `properties`.
#[derive(Debug, Clone, Copy)]
pub struct DefaultAdditionalProperties {
    /// Value written to `additionalProperties`.
    pub default: bool,
}

impl Rule for DefaultAdditionalProperties {
    fn name(&self) -> &str {
        "default-additional-properties"
    }

    fn matches(&self, parent: &Mapping, key: &str) -> bool {
        key == "properties" && !parent.contains_key("additionalProperties")
    }

    fn mutate(&self, parent: &mut Mapping, _key: &str) -> AppResult<()> {
        debug!(
            "Found properties and setting additionalProperties={}",
            self.default
        );
        parent.insert("additionalProperties".to_string(), Value::Bool(self.default));
        Ok(())
    }
}

/// Adds `minProperties` to every open `"type": "object"` schema.
///
/// An object is open when it declares no `properties` and is not explicitly
/// closed with `"additionalProperties": false`.
#[derive(Debug, Clone, Copy)]
pub struct DefaultMinProperties {
    /// Value written to `minProperties`.
    pub default: u64,
}

impl Rule for DefaultMinProperties {
    fn name(&self) -> &str {
        "default-min-properties"
    }

    fn matches(&self, parent: &Mapping, key: &str) -> bool {
        key == "type"
            && parent[key] == "object"
            && !parent.contains_key("minProperties")
            && !parent.contains_key("properties")
            && parent.get("additionalProperties") != Some(&Value::Bool(false))
    }

    fn mutate(&self, parent: &mut Mapping, _key: &str) -> AppResult<()> {
        debug!("Found open object and setting minProperties={}", self.default);
        parent.insert("minProperties".to_string(), Value::from(self.default));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(rule: &dyn Rule, mut doc: Value) -> Value {
        rule.apply(&Engine::new(), &mut doc).unwrap();
        doc
    }

    #[test]
    fn test_require_all_properties_sets_ordered_list() {
        let doc = run(
            &RequireAllProperties,
            json!({ "properties": { "b": {}, "a": {} } }),
        );
        assert_eq!(doc, json!({ "properties": { "b": {}, "a": {} }, "required": ["b", "a"] }));
    }

    #[test]
    fn test_require_all_properties_overrides_partial_list() {
        let doc = run(
            &RequireAllProperties,
            json!({
                "type": "object",
                "properties": { "id": { "type": "integer" }, "name": { "type": "string" } },
                "required": ["name"]
            }),
        );
        assert_eq!(doc["required"], json!(["id", "name"]));
    }

    #[test]
    fn test_require_all_properties_ignores_non_mapping_properties() {
        let before = json!({ "properties": "not a schema" });
        assert_eq!(run(&RequireAllProperties, before.clone()), before);
    }

    #[test]
    fn test_default_min_items_keeps_existing_value() {
        let rule = DefaultArrayMinItems { default: 0 };
        assert_eq!(
            run(&rule, json!({ "type": "array" })),
            json!({ "type": "array", "minItems": 0 })
        );
        assert_eq!(
            run(&rule, json!({ "type": "array", "minItems": 3 })),
            json!({ "type": "array", "minItems": 3 })
        );
    }

    #[test]
    fn test_default_min_items_skips_other_types() {
        let before = json!({ "type": "string", "items": { "type": ["array", "null"] } });
        assert_eq!(run(&DefaultArrayMinItems { default: 1 }, before.clone()), before);
    }

    #[test]
    fn test_default_additional_properties() {
        let rule = DefaultAdditionalProperties { default: false };
        let doc = run(
            &rule,
            json!({
                "properties": { "inner": { "properties": {}, "additionalProperties": true } }
            }),
        );
        assert_eq!(doc["additionalProperties"], false);
        assert_eq!(doc["properties"]["inner"]["additionalProperties"], true);
    }

    #[test]
    fn test_default_min_properties_open_object() {
        let rule = DefaultMinProperties { default: 0 };
        assert_eq!(
            run(&rule, json!({ "type": "object" })),
            json!({ "type": "object", "minProperties": 0 })
        );
    }

    #[test]
    fn test_default_min_properties_respects_closed_and_declared() {
        let rule = DefaultMinProperties { default: 0 };
        for before in [
            json!({ "type": "object", "additionalProperties": false }),
            json!({ "type": "object", "properties": {} }),
            json!({ "type": "object", "minProperties": 2 }),
        ] {
            assert_eq!(run(&rule, before.clone()), before);
        }

        let schema_valued = run(
            &rule,
            json!({ "type": "object", "additionalProperties": { "type": "string" } }),
        );
        assert_eq!(schema_valued["minProperties"], 0);
    }
}
