//! `java.*` configuration, parsed from the `initialize`/
//! `workspace/didChangeConfiguration` payload the way `nova-config` parses
//! its own settings object: a `#[derive(Deserialize)]` struct with
//! `#[serde(default)]` fields, plus a `schemars`-derived JSON schema for
//! editor-side validation.

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct JavaConfig {
    /// Maven coordinates (or equivalent) resolved onto the compiler
    /// facility's classpath.
    pub external_dependencies: Vec<String>,
    /// Absolute paths added directly to the classpath.
    pub class_path: Vec<String>,
}

impl JavaConfig {
    /// `true` once either setting is non-empty: the compiler facility
    /// only exists once there's something to put on its classpath.
    pub fn has_classpath(&self) -> bool {
        !self.external_dependencies.is_empty() || !self.class_path.is_empty()
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(JavaConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_classpath() {
        let config = JavaConfig::default();
        assert!(!config.has_classpath());
    }

    #[test]
    fn parses_camel_case_keys() {
        let value = serde_json::json!({
            "externalDependencies": ["com.acme:widget:1.0"],
            "classPath": ["/opt/libs/widget.jar"]
        });
        let config = JavaConfig::from_json(&value);
        assert_eq!(config.external_dependencies, vec!["com.acme:widget:1.0".to_string()]);
        assert!(config.has_classpath());
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let config = JavaConfig::from_json(&serde_json::json!({}));
        assert!(!config.has_classpath());
    }
}
