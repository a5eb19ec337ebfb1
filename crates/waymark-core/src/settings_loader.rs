//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! Environment variables are mapped from `WAYMARK_<SETTING_NAME>` format:
//!
//! | Env Var | Setting |
//! |---|---|
//! | `WAYMARK_DEBUG` | `debug` |
//! | `WAYMARK_DEFAULT_MODULE` | `default_module` |
//! | `WAYMARK_IDENTIFIER_PARAM` | `identifier_param` |
//! | `WAYMARK_MODULE_ROOT` | `module_root` |
//! | `WAYMARK_LANGUAGE_CODE` | `language_code` |
//! | `WAYMARK_LANGUAGES` | `languages` (comma-separated) |
//! | `WAYMARK_LOG_LEVEL` | `log_level` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use waymark_core::settings_loader;
//!
//! // Load from TOML
//! let settings = settings_loader::from_toml_file("config/waymark.toml").unwrap();
//!
//! // Load from TOML with environment overrides
//! let settings = settings_loader::from_toml_file_with_env("config/waymark.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::WaymarkError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// The TOML is deserialized into a [`Settings`] struct. Any fields not
/// present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, WaymarkError> {
    // Two-step approach: deserialize the TOML into a serde_json::Value, then
    // merge it with the default settings so unspecified fields keep defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| WaymarkError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    let json_value = toml_to_json(toml_value);
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        WaymarkError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, json_value);
    serde_json::from_value(merged).map_err(|e| {
        WaymarkError::ConfigurationError(format!("Failed to deserialize settings from TOML: {e}"))
    })
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, WaymarkError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        WaymarkError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, WaymarkError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, WaymarkError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| WaymarkError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        WaymarkError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, json_value);
    serde_json::from_value(merged).map_err(|e| {
        WaymarkError::ConfigurationError(format!("Failed to deserialize settings from JSON: {e}"))
    })
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, WaymarkError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        WaymarkError::ConfigurationError(format!(
            "Failed to read JSON file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("WAYMARK_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("WAYMARK_DEFAULT_MODULE") {
        settings.default_module = val;
    }

    if let Ok(val) = std::env::var("WAYMARK_IDENTIFIER_PARAM") {
        settings.identifier_param = val;
    }

    if let Ok(val) = std::env::var("WAYMARK_MODULE_ROOT") {
        settings.module_root = Some(val.into());
    }

    if let Ok(val) = std::env::var("WAYMARK_LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Ok(val) = std::env::var("WAYMARK_LANGUAGES") {
        settings.languages = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Ok(val) = std::env::var("WAYMARK_LOG_LEVEL") {
        settings.log_level = val;
    }
}

// ============================================================
// Helpers
// ============================================================

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_v) => override_v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str_partial() {
        let toml = r#"
            default_module = "pages"
            language_code = "fr"
            languages = ["fr", "en"]
        "#;
        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.default_module, "pages");
        assert_eq!(settings.language_code, "fr");
        assert_eq!(settings.languages, vec!["fr", "en"]);
        // Unspecified fields keep their defaults
        assert_eq!(settings.identifier_param, "task");
        assert_eq!(settings.add_marker, "add");
    }

    #[test]
    fn test_from_toml_str_empty_keeps_defaults() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings.default_module, "tasks");
        assert_eq!(settings.language_code, "en");
    }

    #[test]
    fn test_from_toml_str_malformed() {
        assert!(from_toml_str("not [ valid toml").is_err());
    }

    #[test]
    fn test_from_json_str_partial() {
        let json = r#"{"default_module": "articles", "debug": false}"#;
        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.default_module, "articles");
        assert!(!settings.debug);
        assert_eq!(settings.language_code, "en");
    }

    #[test]
    fn test_from_json_str_malformed() {
        assert!(from_json_str("{ nope").is_err());
    }

    #[test]
    fn test_from_toml_file_missing() {
        assert!(from_toml_file("/nonexistent/waymark.toml").is_err());
    }

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        let over = serde_json::json!({"a": {"b": 10}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"b": 10, "c": 2}, "d": 3}));
    }

    #[test]
    fn test_toml_to_json_scalars() {
        let value: toml::Value = toml::from_str("x = [1, \"two\", true]").unwrap();
        let json = toml_to_json(value);
        assert_eq!(json, serde_json::json!({"x": [1, "two", true]}));
    }
}
