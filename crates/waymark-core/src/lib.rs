//! # waymark-core
//!
//! Core types for the waymark routing layer: error types, settings and
//! configuration loading, locale negotiation, and logging integration.
//! This crate has no routing logic of its own and provides the foundation
//! for the routing crate.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Routing-layer settings and global configuration
//! - [`settings_loader`] - TOML/JSON settings loading with env overrides
//! - [`locale`] - Locale table, negotiation, and session locale state
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod locale;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{WaymarkError, WaymarkResult};
pub use locale::{LocaleProvider, Locales, RequestSignals, SessionLocale};
pub use settings::{Settings, SETTINGS};
