//! # waymark-routing
//!
//! The routing layer for waymark: the dispatch path and parameter model,
//! the content-tree existence seam, and the bidirectional rewrite chain
//! that translates between internal dispatch paths and request URLs.
//!
//! ## Modules
//!
//! - [`path`] - The ordered-segment dispatch path
//! - [`params`] - The parameter map carried alongside a path
//! - [`tree`] - Content-tree existence checks (`FsTree`, `MemoryTree`)
//! - [`rewrite`] - Router nodes, routing context, and the chain

pub mod params;
pub mod path;
pub mod rewrite;
pub mod tree;

// Re-export the most commonly used types at the crate root.
pub use params::ParamMap;
pub use path::DispatchPath;
pub use rewrite::chain::{Resolution, RouterChain};
pub use rewrite::context::RoutingContext;
pub use rewrite::node::{RedirectInstruction, RewriteOutcome, RouterNode};
pub use rewrite::routers::{DefaultModuleRouter, DetailRouter, LocaleRouter};
pub use tree::{ContentTree, FsTree, MemoryTree};
