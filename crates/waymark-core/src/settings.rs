//! Settings for the waymark routing layer.
//!
//! This module provides the [`Settings`] struct, which holds all routing
//! configuration, and [`LazySettings`], a globally-accessible,
//! lazily-initialized settings instance.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The complete set of routing-layer settings.
///
/// Use [`SETTINGS`] to access the global instance, or construct and pass
/// instances explicitly (the routing crate takes settings by reference).
///
/// # Examples
///
/// ```
/// use waymark_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.default_module, "tasks");
/// assert_eq!(settings.language_code, "en");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,

    // ── Routing ──────────────────────────────────────────────────────

    /// The name of the default content module. This doubles as the reserved
    /// marker segment injected when a URL does not name an explicit module.
    pub default_module: String,
    /// The parameter key carrying a record identifier (e.g. `task`).
    pub identifier_param: String,
    /// The sub-module segment that must never be folded into an identifier
    /// (e.g. `add` for the "create a record" page).
    pub add_marker: String,
    /// Filesystem root of the content-module tree, if modules are backed by
    /// directories on disk.
    pub module_root: Option<PathBuf>,

    // ── Internationalization ─────────────────────────────────────────

    /// The default locale code (e.g. "en").
    pub language_code: String,
    /// Supported locale codes (e.g. `["en", "fr", "de"]`).
    pub languages: Vec<String>,
    /// The name of the cookie carrying a visitor's language preference.
    pub language_cookie_name: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Core
            debug: true,

            // Routing
            default_module: "tasks".to_string(),
            identifier_param: "task".to_string(),
            add_marker: "add".to_string(),
            module_root: None,

            // Internationalization
            language_code: "en".to_string(),
            languages: vec!["en".to_string()],
            language_cookie_name: "waymark_language".to_string(),

            // Logging
            log_level: "info".to_string(),

            // Extra
            extra: HashMap::new(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
///
/// # Panics
///
/// [`get`](LazySettings::get) panics if settings have not been configured.
/// [`configure`](LazySettings::configure) panics if called more than once.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        assert!(
            self.inner.set(settings).is_ok(),
            "Settings have already been configured"
        );
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured; call SETTINGS.configure() first")
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
