//! The dispatch path model.
//!
//! A [`DispatchPath`] is the ordered sequence of directory-like segments
//! that selects which content module handles a request. Order is
//! significant: it encodes nesting in the content tree. Paths have
//! immutable value semantics; every operation returns a new path.

use std::fmt;

/// An ordered sequence of path segments.
///
/// Segments are non-empty strings; empty segments collapse when parsing a
/// URL path, so `"/en//tasks/"` and `"en/tasks"` parse identically.
///
/// # Examples
///
/// ```
/// use waymark_routing::path::DispatchPath;
///
/// let path = DispatchPath::parse("/en/tasks/42");
/// assert_eq!(path.segments(), ["en", "tasks", "42"]);
/// assert_eq!(path.tail().to_string(), "tasks/42");
/// assert_eq!(path.with_prepended("x").to_string(), "x/en/tasks/42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DispatchPath {
    segments: Vec<String>,
}

impl DispatchPath {
    /// Creates an empty path.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Creates a path from the given segments, in order.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a `/`-separated URL path, collapsing empty segments.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Returns the segments as a slice.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the first segment, if any.
    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Returns the segment at the given index, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new path with the given segment prepended.
    #[must_use]
    pub fn with_prepended(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(segment.into());
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }

    /// Returns a new path with the given segment appended.
    #[must_use]
    pub fn with_appended(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns a new path with the first segment replaced.
    ///
    /// On an empty path this yields a single-segment path.
    #[must_use]
    pub fn with_first_replaced(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        if segments.is_empty() {
            segments.push(segment.into());
        } else {
            segments[0] = segment.into();
        }
        Self { segments }
    }

    /// Returns a new path containing everything after the first segment.
    #[must_use]
    pub fn tail(&self) -> Self {
        Self {
            segments: self.segments.iter().skip(1).cloned().collect(),
        }
    }

    /// Returns a new path truncated to the first `len` segments.
    #[must_use]
    pub fn truncated(&self, len: usize) -> Self {
        Self {
            segments: self.segments.iter().take(len).cloned().collect(),
        }
    }

    /// Returns `true` if this path starts with all of `prefix`'s segments.
    ///
    /// An empty prefix matches every path.
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }
}

impl fmt::Display for DispatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl FromIterator<String> for DispatchPath {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collapses_empty_segments() {
        assert_eq!(
            DispatchPath::parse("/en//tasks/"),
            DispatchPath::parse("en/tasks")
        );
        assert_eq!(DispatchPath::parse("/").segments(), &[] as &[String]);
        assert_eq!(DispatchPath::parse("").segments(), &[] as &[String]);
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let path = DispatchPath::parse("/en/tasks/42");
        assert_eq!(path.to_string(), "en/tasks/42");
    }

    #[test]
    fn test_first_and_get() {
        let path = DispatchPath::parse("a/b/c");
        assert_eq!(path.first(), Some("a"));
        assert_eq!(path.get(1), Some("b"));
        assert_eq!(path.get(3), None);
        assert_eq!(DispatchPath::new().first(), None);
    }

    #[test]
    fn test_with_prepended_leaves_original() {
        let path = DispatchPath::parse("tasks");
        let prefixed = path.with_prepended("en");
        assert_eq!(prefixed.segments(), ["en", "tasks"]);
        assert_eq!(path.segments(), ["tasks"]);
    }

    #[test]
    fn test_with_appended() {
        let path = DispatchPath::parse("tasks");
        assert_eq!(path.with_appended("42").segments(), ["tasks", "42"]);
    }

    #[test]
    fn test_with_first_replaced() {
        let path = DispatchPath::parse("tasks/42");
        assert_eq!(path.with_first_replaced("en").segments(), ["en", "42"]);
        assert_eq!(
            DispatchPath::new().with_first_replaced("en").segments(),
            ["en"]
        );
    }

    #[test]
    fn test_tail() {
        assert_eq!(DispatchPath::parse("en/tasks/42").tail().segments(), ["tasks", "42"]);
        assert!(DispatchPath::new().tail().is_empty());
    }

    #[test]
    fn test_truncated() {
        let path = DispatchPath::parse("tasks/42/extra");
        assert_eq!(path.truncated(1).segments(), ["tasks"]);
        assert_eq!(path.truncated(5).segments(), ["tasks", "42", "extra"]);
        assert!(path.truncated(0).is_empty());
    }

    #[test]
    fn test_starts_with() {
        let path = DispatchPath::parse("tasks/42");
        assert!(path.starts_with(&DispatchPath::new()));
        assert!(path.starts_with(&DispatchPath::parse("tasks")));
        assert!(path.starts_with(&DispatchPath::parse("tasks/42")));
        assert!(!path.starts_with(&DispatchPath::parse("tasks/42/x")));
        assert!(!path.starts_with(&DispatchPath::parse("about")));
    }

    #[test]
    fn test_from_segments() {
        let path = DispatchPath::from_segments(["tasks", "add"]);
        assert_eq!(path.to_string(), "tasks/add");
    }
}
