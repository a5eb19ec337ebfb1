//! The router-node contract.
//!
//! A router node is attached to one level of the content tree and exposes
//! two transforms: [`rewrite_path`](RouterNode::rewrite_path) adjusts an
//! internal dispatch path on its way out to a URL, and
//! [`rewrite_url`](RouterNode::rewrite_url) adjusts an incoming URL path on
//! its way to directory resolution. Both may mutate the parameter map and
//! short-circuit the chain through their [`RewriteOutcome`].

use std::fmt;

use http::StatusCode;

use crate::params::ParamMap;
use crate::path::DispatchPath;
use crate::rewrite::context::RoutingContext;

/// The result of one rewrite step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The original path flows through untouched.
    Unchanged,
    /// The path is replaced; the chain continues with the new one.
    Replace(DispatchPath),
    /// The chain halts; the current path stands as-is.
    Stop,
    /// The request must be redirected to the canonical URL for the carried
    /// internal path. Terminal for the current request; only meaningful on
    /// the inbound side.
    Redirect(DispatchPath),
}

/// An instruction to redirect the client, produced when a rewrite chain
/// ends in a [`RewriteOutcome::Redirect`].
///
/// The router only computes the target; emitting the actual HTTP response
/// is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectInstruction {
    location: String,
    status: StatusCode,
}

impl RedirectInstruction {
    /// Creates a 302 Found redirect to the given URL.
    pub fn found(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            status: StatusCode::FOUND,
        }
    }

    /// Creates a 301 Moved Permanently redirect to the given URL.
    pub fn permanent(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            status: StatusCode::MOVED_PERMANENTLY,
        }
    }

    /// Returns the target URL.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the redirect status code.
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for RedirectInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.status, self.location)
    }
}

/// A unit of the rewrite chain.
///
/// Nodes receive the full dispatch path and a mutable parameter map;
/// parameter mutations are visible to subsequent nodes and to the final
/// dispatch. Session-scoped state (active locale, the segment/parameter
/// flip-flop) lives in the [`RoutingContext`], never in the node itself,
/// so one node instance can serve many sessions.
pub trait RouterNode: fmt::Debug + Send + Sync {
    /// Outbound transform: internal path -> adjusted path, before the
    /// chain joins segments into a URL.
    fn rewrite_path(
        &self,
        ctx: &mut RoutingContext,
        path: &DispatchPath,
        params: &mut ParamMap,
    ) -> RewriteOutcome;

    /// Inbound transform: URL path -> adjusted path, before directory
    /// resolution.
    fn rewrite_url(
        &self,
        ctx: &mut RoutingContext,
        path: &DispatchPath,
        params: &mut ParamMap,
    ) -> RewriteOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_instruction_found() {
        let redirect = RedirectInstruction::found("/en/tasks");
        assert_eq!(redirect.location(), "/en/tasks");
        assert_eq!(redirect.status(), StatusCode::FOUND);
    }

    #[test]
    fn test_redirect_instruction_permanent() {
        let redirect = RedirectInstruction::permanent("/en");
        assert_eq!(redirect.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[test]
    fn test_redirect_instruction_display() {
        let redirect = RedirectInstruction::found("/en");
        assert_eq!(redirect.to_string(), "302 Found -> /en");
    }
}
