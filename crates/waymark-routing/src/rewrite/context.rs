//! Per-session routing state.
//!
//! Everything mutable that the rewrite chain touches lives here: the
//! session's locale provider, the per-request client signals used for
//! locale detection, and the segment-vs-parameter flip-flop written by the
//! detail router. One context belongs to one logical session; concurrent
//! requests sharing a session must serialize access to it.

use waymark_core::locale::{LocaleProvider, RequestSignals, SessionLocale};
use waymark_core::settings::Settings;

/// The mutable state threaded through every rewrite call.
///
/// # Examples
///
/// ```
/// use waymark_core::settings::Settings;
/// use waymark_routing::rewrite::context::RoutingContext;
///
/// let ctx = RoutingContext::from_settings(&Settings::default());
/// assert_eq!(ctx.locale().active(), "en");
/// assert!(ctx.use_parameters());
/// ```
#[derive(Debug)]
pub struct RoutingContext {
    locale: Box<dyn LocaleProvider + Send>,
    signals: RequestSignals,
    use_parameters: bool,
}

impl RoutingContext {
    /// Creates a context over the given locale provider.
    ///
    /// The identifier flip-flop starts as "use parameters": until an
    /// inbound rewrite observes a segment-form identifier, outbound builds
    /// keep identifiers in the query string.
    pub fn new(locale: impl LocaleProvider + Send + 'static) -> Self {
        Self {
            locale: Box::new(locale),
            signals: RequestSignals::new(),
            use_parameters: true,
        }
    }

    /// Creates a context with a [`SessionLocale`] built from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(SessionLocale::from_settings(settings))
    }

    /// Attaches the client signals for the current request.
    #[must_use]
    pub fn with_signals(mut self, signals: RequestSignals) -> Self {
        self.signals = signals;
        self
    }

    /// Replaces the client signals for the current request.
    pub fn set_signals(&mut self, signals: RequestSignals) {
        self.signals = signals;
    }

    /// Returns the session's locale provider.
    pub fn locale(&self) -> &dyn LocaleProvider {
        self.locale.as_ref()
    }

    /// Returns the session's locale provider, mutably.
    pub fn locale_mut(&mut self) -> &mut dyn LocaleProvider {
        self.locale.as_mut()
    }

    /// Returns the current request's client signals.
    pub const fn signals(&self) -> &RequestSignals {
        &self.signals
    }

    /// Returns whether identifiers currently travel as parameters
    /// (`true`) or as trailing URL segments (`false`).
    pub const fn use_parameters(&self) -> bool {
        self.use_parameters
    }

    /// Records which form the identifier was last seen in.
    pub fn set_use_parameters(&mut self, use_parameters: bool) {
        self.use_parameters = use_parameters;
    }
}
