//! Integration tests for the full rewrite chain.
//!
//! Exercises the locale-aware and locale-free chains end-to-end: URL
//! round-trips, default-module folding, locale detection and redirects,
//! the segment/parameter toggle, and module-vs-argument ambiguity.

use std::sync::Arc;

use waymark_core::locale::RequestSignals;
use waymark_core::settings::Settings;
use waymark_routing::{
    ContentTree, DispatchPath, MemoryTree, ParamMap, Resolution, RouterChain, RoutingContext,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn settings() -> Settings {
    Settings {
        languages: vec!["en".to_string(), "fr".to_string()],
        ..Settings::default()
    }
}

fn tree() -> Arc<dyn ContentTree> {
    Arc::new(MemoryTree::with_dirs(["tasks", "tasks/add", "about"]))
}

fn localized() -> (RouterChain, RoutingContext) {
    let settings = settings();
    let chain = RouterChain::localized(&settings, tree());
    let ctx = RoutingContext::from_settings(&settings);
    (chain, ctx)
}

fn locale_free() -> (RouterChain, RoutingContext) {
    let settings = settings();
    let chain = RouterChain::locale_free(&settings, tree());
    let ctx = RoutingContext::from_settings(&settings);
    (chain, ctx)
}

fn dispatch(resolution: Resolution) -> (DispatchPath, ParamMap) {
    match resolution {
        Resolution::Dispatch { module, params } => (module, params),
        Resolution::Redirect(redirect) => panic!("unexpected redirect to {}", redirect.location()),
    }
}

// ── Round trips ──────────────────────────────────────────────────────

#[test]
fn test_round_trip_default_module() {
    let (chain, mut ctx) = localized();
    let url = chain.build_url(&DispatchPath::parse("tasks"), &ParamMap::new(), &mut ctx);
    assert_eq!(url, "/en");

    let (module, params) = dispatch(chain.resolve(&url, &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks"));
    assert!(params.is_empty());
}

#[test]
fn test_round_trip_sibling_module() {
    let (chain, mut ctx) = localized();
    let url = chain.build_url(&DispatchPath::parse("about"), &ParamMap::new(), &mut ctx);
    assert_eq!(url, "/en/about");

    let (module, _) = dispatch(chain.resolve(&url, &mut ctx));
    assert_eq!(module, DispatchPath::parse("about"));
}

#[test]
fn test_round_trip_add_sub_module() {
    let (chain, mut ctx) = localized();
    let url = chain.build_url(
        &DispatchPath::parse("tasks/add"),
        &ParamMap::new(),
        &mut ctx,
    );
    assert_eq!(url, "/en/add");

    let (module, params) = dispatch(chain.resolve(&url, &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks/add"));
    assert!(params.is_empty());
}

#[test]
fn test_round_trip_parameter_form() {
    let (chain, mut ctx) = localized();
    let params = ParamMap::parse("task=42&mode=edit");
    let url = chain.build_url(&DispatchPath::parse("tasks"), &params, &mut ctx);
    assert_eq!(url, "/en?mode=edit&task=42");

    let (module, resolved) = dispatch(chain.resolve(&url, &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks"));
    assert_eq!(resolved.get("task"), Some("42"));
    assert_eq!(resolved.get("mode"), Some("edit"));
}

#[test]
fn test_round_trip_preserves_active_locale() {
    let (chain, mut ctx) = localized();
    let (_, _) = dispatch(chain.resolve("/fr/about", &mut ctx));
    assert_eq!(ctx.locale().active(), "fr");

    let url = chain.build_url(&DispatchPath::parse("about"), &ParamMap::new(), &mut ctx);
    assert_eq!(url, "/fr/about");
}

// ── Default-module folding ───────────────────────────────────────────

#[test]
fn test_folding_idempotence() {
    let expected = DispatchPath::parse("tasks");

    let (chain, mut ctx) = localized();
    let (from_explicit, _) = dispatch(chain.resolve("/en/tasks", &mut ctx));
    assert_eq!(from_explicit, expected);

    let (from_bare_locale, _) = dispatch(chain.resolve("/en", &mut ctx));
    assert_eq!(from_bare_locale, expected);

    // The locale-less root redirects; its target resolves to the same module.
    let (chain, mut ctx) = localized();
    let Resolution::Redirect(redirect) = chain.resolve("/", &mut ctx) else {
        panic!("expected redirect");
    };
    let (from_root, _) = dispatch(chain.resolve(redirect.location(), &mut ctx));
    assert_eq!(from_root, expected);
}

#[test]
fn test_unknown_locale_accepted_without_validation() {
    let (chain, mut ctx) = localized();
    let (module, _) = dispatch(chain.resolve("/zz/tasks", &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks"));
    assert_eq!(ctx.locale().active(), "zz");
}

// ── Locale redirect ──────────────────────────────────────────────────

#[test]
fn test_locale_less_root_redirects_to_detected_locale() {
    let settings = settings();
    let chain = RouterChain::localized(&settings, tree());
    let mut ctx = RoutingContext::from_settings(&settings)
        .with_signals(RequestSignals::new().with_accept_language("fr-CA,fr;q=0.9,en;q=0.4"));

    let Resolution::Redirect(redirect) = chain.resolve("/", &mut ctx) else {
        panic!("expected redirect");
    };
    assert_eq!(redirect.location(), "/fr");
    assert_eq!(redirect.status().as_u16(), 302);
    assert_eq!(ctx.locale().active(), "fr");
}

#[test]
fn test_locale_prefixed_url_does_not_redirect() {
    let (chain, mut ctx) = localized();
    assert!(matches!(
        chain.resolve("/en/tasks", &mut ctx),
        Resolution::Dispatch { .. }
    ));
}

#[test]
fn test_language_cookie_wins_over_header() {
    let settings = settings();
    let chain = RouterChain::localized(&settings, tree());
    let mut ctx = RoutingContext::from_settings(&settings).with_signals(
        RequestSignals::new()
            .with_cookie_language("en")
            .with_accept_language("fr"),
    );

    let Resolution::Redirect(redirect) = chain.resolve("/", &mut ctx) else {
        panic!("expected redirect");
    };
    assert_eq!(redirect.location(), "/en");
}

// ── Segment/parameter toggle ─────────────────────────────────────────

#[test]
fn test_toggle_consistency_segment_form() {
    let (chain, mut ctx) = locale_free();

    let (module, params) = dispatch(chain.resolve("/tasks/42", &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks"));
    assert_eq!(params.get("task"), Some("42"));
    assert!(!ctx.use_parameters());

    let url = chain.build_url(&module, &params, &mut ctx);
    assert_eq!(url, "/tasks/42");
}

#[test]
fn test_toggle_consistency_parameter_form() {
    let (chain, mut ctx) = locale_free();

    let (module, params) = dispatch(chain.resolve("/tasks?task=42", &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks"));
    assert_eq!(params.get("task"), Some("42"));
    assert!(ctx.use_parameters());

    let url = chain.build_url(&module, &params, &mut ctx);
    assert_eq!(url, "/tasks?task=42");
}

#[test]
fn test_toggle_segment_form_through_locale_chain() {
    let (chain, mut ctx) = localized();

    let (module, params) = dispatch(chain.resolve("/en/tasks/42", &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks"));
    assert_eq!(params.get("task"), Some("42"));
    assert!(!ctx.use_parameters());

    // Canonical segment form: the marker collapses into the locale prefix.
    let url = chain.build_url(&module, &params, &mut ctx);
    assert_eq!(url, "/en/42");
}

#[test]
fn test_toggle_defaults_to_parameter_form_without_inbound() {
    let (chain, mut ctx) = locale_free();
    let params = ParamMap::parse("task=42");
    let url = chain.build_url(&DispatchPath::parse("tasks"), &params, &mut ctx);
    assert_eq!(url, "/tasks?task=42");
}

// ── Ambiguity resolution ─────────────────────────────────────────────

#[test]
fn test_add_resolves_to_sub_module() {
    let (chain, mut ctx) = locale_free();
    let (module, params) = dispatch(chain.resolve("/tasks/add", &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks/add"));
    assert!(params.is_empty());
}

#[test]
fn test_unknown_trailing_segment_folds_to_identifier() {
    let (chain, mut ctx) = locale_free();
    let (module, params) = dispatch(chain.resolve("/tasks/grocery-run", &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks"));
    assert_eq!(params.get("task"), Some("grocery-run"));
}

#[test]
fn test_bare_identifier_folds_under_default_module() {
    let (chain, mut ctx) = locale_free();
    let (module, params) = dispatch(chain.resolve("/42", &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks"));
    assert_eq!(params.get("task"), Some("42"));
}

// ── Parameter mutation visibility ────────────────────────────────────

#[test]
fn test_extra_parameters_flow_through_untouched() {
    let (chain, mut ctx) = locale_free();
    let (module, params) = dispatch(chain.resolve("/tasks/42?mode=edit", &mut ctx));
    assert_eq!(module, DispatchPath::parse("tasks"));
    assert_eq!(params.get("task"), Some("42"));
    assert_eq!(params.get("mode"), Some("edit"));

    let url = chain.build_url(&module, &params, &mut ctx);
    assert_eq!(url, "/tasks/42?mode=edit");
}

#[test]
fn test_sessions_do_not_share_state() {
    let settings = settings();
    let chain = RouterChain::localized(&settings, tree());
    let mut first = RoutingContext::from_settings(&settings);
    let mut second = RoutingContext::from_settings(&settings);

    let _ = dispatch(chain.resolve("/fr/tasks/42", &mut first));
    assert_eq!(first.locale().active(), "fr");
    assert!(!first.use_parameters());

    // The second session keeps its own defaults.
    assert_eq!(second.locale().active(), "en");
    assert!(second.use_parameters());
    let url = chain.build_url(
        &DispatchPath::parse("tasks"),
        &ParamMap::parse("task=1"),
        &mut second,
    );
    assert_eq!(url, "/en?task=1");
}
