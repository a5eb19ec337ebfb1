//! # waymark
//!
//! A content-tree routing layer: bidirectional translation between internal
//! dispatch paths and external request URLs, with locale prefixing,
//! default-module folding, and segment/parameter identifier toggling.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `waymark` to get the whole layer, or on the individual
//! crates for finer-grained control.

/// Core types: errors, settings, locale negotiation, and logging.
pub use waymark_core as core;

/// The routing layer: path/parameter model, content tree, rewrite chain.
#[cfg(feature = "routing")]
pub use waymark_routing as routing;
