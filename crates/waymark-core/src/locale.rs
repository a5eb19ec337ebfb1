//! Locale negotiation and session-scoped locale state.
//!
//! The routing layer needs exactly three locale operations: read the active
//! locale, set it, and detect a visitor's preferred locale from client
//! signals. [`LocaleProvider`] is that seam; [`SessionLocale`] is the
//! in-tree implementation, holding one session's active code next to the
//! configured [`Locales`] table.
//!
//! The active locale is deliberately *not* process-global state: each
//! session owns its own provider instance, so parallel sessions cannot
//! observe each other's locale changes.

use std::fmt;

use crate::settings::Settings;

/// Client signals available for locale detection.
///
/// Carried per request; the provider never reads them from ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSignals {
    /// The value of the language preference cookie, if the client sent one.
    pub cookie_language: Option<String>,
    /// The raw `Accept-Language` header value, if present.
    pub accept_language: Option<String>,
}

impl RequestSignals {
    /// Creates empty signals (no cookie, no header).
    pub const fn new() -> Self {
        Self {
            cookie_language: None,
            accept_language: None,
        }
    }

    /// Sets the language cookie value.
    #[must_use]
    pub fn with_cookie_language(mut self, value: impl Into<String>) -> Self {
        self.cookie_language = Some(value.into());
        self
    }

    /// Sets the `Accept-Language` header value.
    #[must_use]
    pub fn with_accept_language(mut self, value: impl Into<String>) -> Self {
        self.accept_language = Some(value.into());
        self
    }
}

/// The configured locale table: a default code plus the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locales {
    default: String,
    supported: Vec<String>,
}

impl Locales {
    /// Creates a locale table from a default code and the supported set.
    pub fn new(default: impl Into<String>, supported: Vec<String>) -> Self {
        Self {
            default: default.into(),
            supported,
        }
    }

    /// Builds the locale table from settings (`language_code`, `languages`).
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.language_code.clone(), settings.languages.clone())
    }

    /// Returns the default locale code.
    pub fn default_code(&self) -> &str {
        &self.default
    }

    /// Returns the supported locale codes.
    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// Returns `true` if the given code is in the supported set.
    ///
    /// Comparison is case-insensitive on the primary subtag: `"en-US"`
    /// matches a supported `"en"`.
    pub fn is_supported(&self, code: &str) -> bool {
        let primary = primary_subtag(code);
        self.supported
            .iter()
            .any(|s| s.to_lowercase() == primary)
    }

    /// Parses an `Accept-Language` header and returns the best supported match.
    ///
    /// Supports quality values (e.g., `en-US,en;q=0.9,fr;q=0.8`). Returns
    /// `None` when no listed language is supported.
    pub fn negotiate(&self, header: &str) -> Option<String> {
        let mut candidates: Vec<(f32, String)> = Vec::new();

        for part in header.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (lang, quality) = if let Some(idx) = part.find(";q=") {
                let lang = part[..idx].trim();
                let q: f32 = part[idx + 3..].trim().parse().unwrap_or(0.0);
                (lang, q)
            } else {
                (part, 1.0)
            };

            let primary = primary_subtag(lang);
            if self.supported.iter().any(|s| s.to_lowercase() == primary) {
                candidates.push((quality, primary));
            }
        }

        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        candidates.into_iter().next().map(|(_, lang)| lang)
    }
}

/// Normalizes a language tag to its lowercase primary subtag
/// (e.g., `"en"` from `"en-US"`).
fn primary_subtag(tag: &str) -> String {
    tag.split('-').next().unwrap_or(tag).to_lowercase()
}

/// Resolves and stores the active locale for one session.
///
/// The router consumes this interface in three places: outbound URL
/// building reads [`active`](LocaleProvider::active) for the locale prefix,
/// inbound resolution calls [`set_active`](LocaleProvider::set_active) with
/// the first URL segment, and locale-less URLs trigger
/// [`detect`](LocaleProvider::detect) before the canonical redirect.
pub trait LocaleProvider: fmt::Debug {
    /// Returns the active locale code, falling back to the configured default.
    fn active(&self) -> &str;

    /// Sets the active locale code.
    ///
    /// Implementations are permissive by contract: an unrecognized code is
    /// accepted as-is and propagated to whatever consumes the locale later.
    fn set_active(&mut self, code: &str);

    /// Detects the preferred locale from the given client signals.
    fn detect(&self, signals: &RequestSignals) -> String;
}

/// Session-scoped locale state over a configured [`Locales`] table.
///
/// Detection preference order: language cookie, then `Accept-Language`
/// negotiation, then the configured default.
///
/// # Examples
///
/// ```
/// use waymark_core::locale::{Locales, LocaleProvider, RequestSignals, SessionLocale};
///
/// let locales = Locales::new("en", vec!["en".into(), "fr".into()]);
/// let mut session = SessionLocale::new(locales);
/// assert_eq!(session.active(), "en");
///
/// let signals = RequestSignals::new().with_accept_language("fr-CA,fr;q=0.9");
/// let detected = session.detect(&signals);
/// session.set_active(&detected);
/// assert_eq!(session.active(), "fr");
/// ```
#[derive(Debug, Clone)]
pub struct SessionLocale {
    locales: Locales,
    active: Option<String>,
}

impl SessionLocale {
    /// Creates a session with no active locale; reads fall back to the default.
    pub const fn new(locales: Locales) -> Self {
        Self {
            locales,
            active: None,
        }
    }

    /// Builds a session directly from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Locales::from_settings(settings))
    }

    /// Returns the configured locale table.
    pub const fn locales(&self) -> &Locales {
        &self.locales
    }
}

impl LocaleProvider for SessionLocale {
    fn active(&self) -> &str {
        self.active
            .as_deref()
            .unwrap_or_else(|| self.locales.default_code())
    }

    fn set_active(&mut self, code: &str) {
        if !self.locales.is_supported(code) {
            tracing::warn!(locale = code, "activating unsupported locale code");
        }
        self.active = Some(code.to_string());
    }

    fn detect(&self, signals: &RequestSignals) -> String {
        if let Some(cookie) = &signals.cookie_language {
            if self.locales.is_supported(cookie) {
                return primary_subtag(cookie);
            }
        }

        if let Some(header) = &signals.accept_language {
            if let Some(lang) = self.locales.negotiate(header) {
                return lang;
            }
        }

        self.locales.default_code().to_string()
    }
}
