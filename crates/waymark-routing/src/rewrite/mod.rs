//! The bidirectional rewrite chain.
//!
//! This module provides the core translation between internal dispatch
//! paths and request URLs:
//!
//! - [`node`]: the [`RouterNode`](node::RouterNode) contract and the
//!   four-way [`RewriteOutcome`](node::RewriteOutcome)
//! - [`context`]: per-session routing state (locale, identifier flip-flop)
//! - [`routers`]: the locale-aware root, the locale-free variant, and the
//!   toggling detail router
//! - [`chain`]: the mounted-node chain with `build_url` and `resolve`
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use waymark_core::settings::Settings;
//! use waymark_routing::path::DispatchPath;
//! use waymark_routing::params::ParamMap;
//! use waymark_routing::rewrite::chain::{Resolution, RouterChain};
//! use waymark_routing::rewrite::context::RoutingContext;
//! use waymark_routing::tree::MemoryTree;
//!
//! let settings = Settings::default();
//! let tree = Arc::new(MemoryTree::with_dirs(["tasks", "tasks/add", "about"]));
//! let chain = RouterChain::localized(&settings, tree);
//! let mut ctx = RoutingContext::from_settings(&settings);
//!
//! // Inbound: a trailing identifier folds into a parameter.
//! let Resolution::Dispatch { module, params } = chain.resolve("/en/42", &mut ctx) else {
//!     panic!("expected dispatch");
//! };
//! assert_eq!(module, DispatchPath::parse("tasks"));
//! assert_eq!(params.get("task"), Some("42"));
//!
//! // Outbound: the same context reproduces segment form.
//! assert_eq!(chain.build_url(&module, &params, &mut ctx), "/en/42");
//! ```

pub mod chain;
pub mod context;
pub mod node;
pub mod routers;
