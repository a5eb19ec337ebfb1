//! The router nodes.
//!
//! Three node variants cover the content tree:
//!
//! - [`LocaleRouter`]: the root-level node. Guarantees a locale prefix on
//!   every outbound URL, consumes the prefix inbound (detecting and
//!   redirecting when it is missing), and folds unqualified remainders
//!   under the default module.
//! - [`DefaultModuleRouter`]: the locale-free variant; default-module
//!   folding only.
//! - [`DetailRouter`]: mounted at a record-bearing module. Decides whether
//!   a record identifier travels as a trailing segment (`/tasks/42`) or a
//!   named parameter (`?task=42`), keeping both directions consistent via
//!   the context's flip-flop.

use std::sync::Arc;

use crate::params::ParamMap;
use crate::path::DispatchPath;
use crate::rewrite::context::RoutingContext;
use crate::rewrite::node::{RewriteOutcome, RouterNode};
use crate::tree::ContentTree;

/// Folds an unqualified remainder under the default module.
///
/// A remainder resolves under the default module unless its first segment
/// names an existing top-level directory in the content tree. A remainder
/// already starting with the marker needs no injection; prepending there
/// would duplicate the marker and change where the path dispatches.
fn fold_default_module(
    remainder: &DispatchPath,
    marker: &str,
    tree: &dyn ContentTree,
) -> DispatchPath {
    if remainder.is_empty() {
        return DispatchPath::from_segments([marker]);
    }

    match remainder.first() {
        Some(first) if first == marker => remainder.clone(),
        Some(first) => {
            let candidate = DispatchPath::from_segments([first]);
            if tree.directory_exists(&candidate) {
                remainder.clone()
            } else {
                tracing::debug!(segment = first, "folding under default module");
                remainder.with_prepended(marker)
            }
        }
        None => remainder.clone(),
    }
}

/// The locale-aware root router.
///
/// Outbound, every URL gains a locale prefix: a path starting with the
/// default-module marker has the marker *replaced* by the active locale
/// (the default module never appears in URLs), any other path has the
/// locale prepended. Inbound, the first segment is consumed as the locale;
/// a locale-less URL triggers detection and a redirect to the canonical
/// locale-prefixed equivalent.
#[derive(Debug, Clone)]
pub struct LocaleRouter {
    default_module: String,
    tree: Arc<dyn ContentTree>,
}

impl LocaleRouter {
    /// Creates a root router for the given default module and content tree.
    pub fn new(default_module: impl Into<String>, tree: Arc<dyn ContentTree>) -> Self {
        Self {
            default_module: default_module.into(),
            tree,
        }
    }
}

impl RouterNode for LocaleRouter {
    fn rewrite_path(
        &self,
        ctx: &mut RoutingContext,
        path: &DispatchPath,
        _params: &mut ParamMap,
    ) -> RewriteOutcome {
        let locale = ctx.locale().active().to_string();
        let rewritten = if path.first() == Some(self.default_module.as_str()) {
            path.with_first_replaced(locale)
        } else {
            path.with_prepended(locale)
        };
        RewriteOutcome::Replace(rewritten)
    }

    fn rewrite_url(
        &self,
        ctx: &mut RoutingContext,
        path: &DispatchPath,
        _params: &mut ParamMap,
    ) -> RewriteOutcome {
        let Some(candidate) = path.first().map(String::from) else {
            // Locale-less URL: detect the visitor's preference and redirect
            // to the canonical locale-prefixed equivalent.
            let detected = ctx.locale().detect(ctx.signals());
            ctx.locale_mut().set_active(&detected);
            let target = fold_default_module(&path.tail(), &self.default_module, &*self.tree);
            tracing::info!(locale = %detected, redirect = %target, "locale missing, redirecting");
            return RewriteOutcome::Redirect(target);
        };

        // No existence validation here: an unrecognized code is accepted
        // as-is and propagated.
        ctx.locale_mut().set_active(&candidate);
        tracing::debug!(locale = %candidate, "activated locale from URL");

        let folded = fold_default_module(&path.tail(), &self.default_module, &*self.tree);
        RewriteOutcome::Replace(folded)
    }
}

/// The locale-free root router.
///
/// Same structural role as [`LocaleRouter`] with locale handling stripped:
/// outbound is a no-op, inbound applies only default-module folding.
#[derive(Debug, Clone)]
pub struct DefaultModuleRouter {
    default_module: String,
    tree: Arc<dyn ContentTree>,
}

impl DefaultModuleRouter {
    /// Creates a root router for the given default module and content tree.
    pub fn new(default_module: impl Into<String>, tree: Arc<dyn ContentTree>) -> Self {
        Self {
            default_module: default_module.into(),
            tree,
        }
    }
}

impl RouterNode for DefaultModuleRouter {
    fn rewrite_path(
        &self,
        _ctx: &mut RoutingContext,
        _path: &DispatchPath,
        _params: &mut ParamMap,
    ) -> RewriteOutcome {
        RewriteOutcome::Unchanged
    }

    fn rewrite_url(
        &self,
        _ctx: &mut RoutingContext,
        path: &DispatchPath,
        _params: &mut ParamMap,
    ) -> RewriteOutcome {
        let folded = fold_default_module(path, &self.default_module, &*self.tree);
        if folded == *path {
            RewriteOutcome::Unchanged
        } else {
            RewriteOutcome::Replace(folded)
        }
    }
}

/// The toggling detail router.
///
/// Mounted at a record-bearing module; receives the dispatch path starting
/// at its module segment. Inbound, a trailing identifier segment is
/// normalized into parameter form for the handler while the context
/// remembers (`use_parameters = false`) that the request arrived in
/// segment form; the matching outbound build then reproduces segment form
/// instead of silently switching to a query parameter.
///
/// The segment directly after the module equal to the add marker is never
/// treated as an identifier, so the "create a record" page stays reachable.
#[derive(Debug, Clone)]
pub struct DetailRouter {
    module: String,
    param: String,
    add_marker: String,
}

impl DetailRouter {
    /// Creates a detail router for the given module and identifier
    /// parameter, with the default `add` marker.
    pub fn new(module: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            param: param.into(),
            add_marker: "add".to_string(),
        }
    }

    /// Overrides the sub-module marker that is exempt from identifier
    /// folding.
    #[must_use]
    pub fn with_add_marker(mut self, marker: impl Into<String>) -> Self {
        self.add_marker = marker.into();
        self
    }

    /// Returns the module this router is mounted at.
    pub fn module(&self) -> &str {
        &self.module
    }

    fn is_exempt(&self, path: &DispatchPath) -> bool {
        path.is_empty() || path.get(1) == Some(self.add_marker.as_str())
    }
}

impl RouterNode for DetailRouter {
    fn rewrite_path(
        &self,
        ctx: &mut RoutingContext,
        path: &DispatchPath,
        params: &mut ParamMap,
    ) -> RewriteOutcome {
        if self.is_exempt(path) {
            return RewriteOutcome::Unchanged;
        }

        if !ctx.use_parameters() {
            // The identifier last arrived in segment form; reproduce it.
            if let Ok(Some(value)) = params.remove(&self.param) {
                return RewriteOutcome::Replace(path.with_appended(value));
            }
        }
        RewriteOutcome::Unchanged
    }

    fn rewrite_url(
        &self,
        ctx: &mut RoutingContext,
        path: &DispatchPath,
        params: &mut ParamMap,
    ) -> RewriteOutcome {
        if self.is_exempt(path) {
            return RewriteOutcome::Unchanged;
        }

        ctx.set_use_parameters(params.contains_key(&self.param));

        if !ctx.use_parameters() {
            if let Some(value) = path.get(1).map(String::from) {
                if params.set(&self.param, &value).is_err() {
                    return RewriteOutcome::Unchanged;
                }
                tracing::debug!(param = %self.param, value = %value, "folded segment into parameter");
                return RewriteOutcome::Replace(path.truncated(1));
            }
        }
        RewriteOutcome::Unchanged
    }
}
