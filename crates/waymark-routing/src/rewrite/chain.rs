//! The router chain.
//!
//! [`RouterChain`] owns an ordered list of mounted router nodes and exposes
//! the two dispatcher-facing operations: [`build_url`](RouterChain::build_url)
//! turns an internal dispatch path and parameter map into a request URL, and
//! [`resolve`](RouterChain::resolve) turns an incoming URL back into the
//! dispatch path and parameters — or into a redirect instruction.
//!
//! Nodes are applied in a fixed, deterministic order derived from the
//! content-tree hierarchy: inbound walks shallowest mount first (the root
//! node consumes the locale prefix and folds the default module before
//! deeper nodes see the path), outbound walks deepest mount first (the
//! detail router shapes the module-relative tail before the root node
//! attaches the locale prefix). The order never varies between the two
//! passes for the same path.

use std::fmt;
use std::sync::Arc;

use waymark_core::settings::Settings;

use crate::params::ParamMap;
use crate::path::DispatchPath;
use crate::rewrite::context::RoutingContext;
use crate::rewrite::node::{RedirectInstruction, RewriteOutcome, RouterNode};
use crate::rewrite::routers::{DefaultModuleRouter, DetailRouter, LocaleRouter};
use crate::tree::ContentTree;

/// The result of resolving an incoming URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The URL resolved to a module path and its parameters.
    Dispatch {
        /// The dispatch path locating the handler module.
        module: DispatchPath,
        /// The parameters visible to the handler.
        params: ParamMap,
    },
    /// The request must be redirected; terminal for the current request,
    /// never retried automatically.
    Redirect(RedirectInstruction),
}

struct ChainEntry {
    mount: DispatchPath,
    node: Box<dyn RouterNode>,
}

impl fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainEntry")
            .field("mount", &self.mount)
            .field("node", &self.node)
            .finish()
    }
}

/// An ordered list of router nodes resolved from the content-tree
/// hierarchy.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use waymark_core::settings::Settings;
/// use waymark_routing::path::DispatchPath;
/// use waymark_routing::params::ParamMap;
/// use waymark_routing::rewrite::chain::RouterChain;
/// use waymark_routing::rewrite::context::RoutingContext;
/// use waymark_routing::tree::MemoryTree;
///
/// let settings = Settings::default();
/// let tree = Arc::new(MemoryTree::with_dirs(["tasks", "tasks/add", "about"]));
/// let chain = RouterChain::localized(&settings, tree);
///
/// let mut ctx = RoutingContext::from_settings(&settings);
/// let url = chain.build_url(&DispatchPath::parse("tasks"), &ParamMap::new(), &mut ctx);
/// assert_eq!(url, "/en");
/// ```
#[derive(Debug, Default)]
pub struct RouterChain {
    entries: Vec<ChainEntry>,
}

impl RouterChain {
    /// Creates an empty chain.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Mounts a node at the given path prefix.
    ///
    /// A node applies to a rewrite pass when the current path starts with
    /// its mount; the root mount (empty path) applies to everything.
    /// Entries keep insertion order among equal-depth mounts.
    #[must_use]
    pub fn mount(mut self, mount: DispatchPath, node: impl RouterNode + 'static) -> Self {
        self.entries.push(ChainEntry {
            mount,
            node: Box::new(node),
        });
        self.entries.sort_by_key(|entry| entry.mount.len());
        self
    }

    /// Builds the standard locale-aware chain from settings: a
    /// [`LocaleRouter`] at the root and a [`DetailRouter`] at the default
    /// module.
    pub fn localized(settings: &Settings, tree: Arc<dyn ContentTree>) -> Self {
        Self::new()
            .mount(
                DispatchPath::new(),
                LocaleRouter::new(&settings.default_module, tree),
            )
            .mount(
                DispatchPath::parse(&settings.default_module),
                DetailRouter::new(&settings.default_module, &settings.identifier_param)
                    .with_add_marker(&settings.add_marker),
            )
    }

    /// Builds the locale-free chain from settings: a
    /// [`DefaultModuleRouter`] at the root and a [`DetailRouter`] at the
    /// default module.
    pub fn locale_free(settings: &Settings, tree: Arc<dyn ContentTree>) -> Self {
        Self::new()
            .mount(
                DispatchPath::new(),
                DefaultModuleRouter::new(&settings.default_module, tree),
            )
            .mount(
                DispatchPath::parse(&settings.default_module),
                DetailRouter::new(&settings.default_module, &settings.identifier_param)
                    .with_add_marker(&settings.add_marker),
            )
    }

    /// Builds a request URL for an internal dispatch path and parameters.
    ///
    /// Applies each matching node's outbound rewrite deepest mount first,
    /// joins the resulting segments with `/`, and appends the remaining
    /// parameters as a query string.
    pub fn build_url(
        &self,
        path: &DispatchPath,
        params: &ParamMap,
        ctx: &mut RoutingContext,
    ) -> String {
        let mut current = path.clone();
        let mut params = params.copy();

        for entry in self.entries.iter().rev() {
            if !current.starts_with(&entry.mount) {
                continue;
            }
            match entry.node.rewrite_path(ctx, &current, &mut params) {
                RewriteOutcome::Unchanged => {}
                RewriteOutcome::Replace(next) => current = next,
                RewriteOutcome::Stop => break,
                RewriteOutcome::Redirect(target) => {
                    tracing::warn!(redirect = %target, "ignoring redirect outcome on outbound pass");
                    break;
                }
            }
        }

        let mut url = format!("/{current}");
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.urlencode());
        }
        url
    }

    /// Resolves an incoming URL (path plus optional query string) into the
    /// internal dispatch path and parameters, or a redirect instruction.
    ///
    /// Applies each matching node's inbound rewrite shallowest mount first.
    /// A redirect outcome is terminal: its target URL is computed through
    /// [`build_url`](Self::build_url) so the redirect always points at the
    /// canonical form.
    pub fn resolve(&self, url: &str, ctx: &mut RoutingContext) -> Resolution {
        let (path_part, query) = url.split_once('?').unwrap_or((url, ""));
        let mut current = DispatchPath::parse(path_part);
        let mut params = ParamMap::parse(query).copy();

        for entry in &self.entries {
            if !current.starts_with(&entry.mount) {
                continue;
            }
            match entry.node.rewrite_url(ctx, &current, &mut params) {
                RewriteOutcome::Unchanged => {}
                RewriteOutcome::Replace(next) => current = next,
                RewriteOutcome::Stop => break,
                RewriteOutcome::Redirect(target) => {
                    let location = self.build_url(&target, &params, ctx);
                    tracing::info!(%location, "resolution ended in redirect");
                    return Resolution::Redirect(RedirectInstruction::found(location));
                }
            }
        }

        Resolution::Dispatch {
            module: current,
            params,
        }
    }
}
