//! The parameter map carried alongside a dispatch path.
//!
//! [`ParamMap`] is a string-keyed, single-valued dictionary for query
//! parameters. Like a query dictionary parsed from a request, it is
//! immutable by default; [`copy`](ParamMap::copy) returns a mutable clone.
//! The rewrite chain always works on a mutable copy, so nodes can add and
//! remove keys and the mutations stay visible to later nodes and to the
//! final dispatch.

use std::collections::HashMap;

use waymark_core::{WaymarkError, WaymarkResult};

/// An immutable-by-default dictionary of string parameters.
///
/// Keys are unique; parsing a query string with a repeated key keeps the
/// last value.
///
/// # Examples
///
/// ```
/// use waymark_routing::params::ParamMap;
///
/// let params = ParamMap::parse("task=42&mode=edit");
/// assert_eq!(params.get("task"), Some("42"));
///
/// let mut mutable = params.copy();
/// mutable.set("task", "7").unwrap();
/// assert_eq!(mutable.get("task"), Some("7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMap {
    data: HashMap<String, String>,
    mutable: bool,
}

impl Default for ParamMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamMap {
    /// Creates a new, empty, immutable `ParamMap`.
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            mutable: false,
        }
    }

    /// Creates a new, empty, mutable `ParamMap`.
    pub fn new_mutable() -> Self {
        Self {
            data: HashMap::new(),
            mutable: true,
        }
    }

    /// Parses a URL query string (e.g., `"task=42&mode=edit"`) into an
    /// immutable `ParamMap`.
    ///
    /// Handles percent-encoding and `+`-as-space form encoding. A repeated
    /// key keeps the last value.
    pub fn parse(query_string: &str) -> Self {
        let mut data = HashMap::new();

        for pair in query_string.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (key, value) = pair
                .find('=')
                .map_or((pair, ""), |eq_pos| (&pair[..eq_pos], &pair[eq_pos + 1..]));

            data.insert(percent_decode(key), percent_decode(value));
        }

        Self {
            data,
            mutable: false,
        }
    }

    /// Returns the value for the given key, or `None` if not present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Returns `true` if the specified key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Sets the value for the given key, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::SuspiciousOperation`] if this map is immutable.
    pub fn set(&mut self, key: &str, value: &str) -> WaymarkResult<()> {
        self.check_mutable()?;
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Removes the given key, returning its value if it was present.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::SuspiciousOperation`] if this map is immutable.
    pub fn remove(&mut self, key: &str) -> WaymarkResult<Option<String>> {
        self.check_mutable()?;
        Ok(self.data.remove(key))
    }

    /// Returns a mutable copy of this `ParamMap`.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            data: self.data.clone(),
            mutable: true,
        }
    }

    /// Encodes this `ParamMap` as a URL query string.
    ///
    /// All keys and values are percent-encoded; pairs are sorted by key so
    /// the encoding is deterministic.
    pub fn urlencode(&self) -> String {
        let mut parts: Vec<String> = self
            .data
            .iter()
            .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
            .collect();

        parts.sort();
        parts.join("&")
    }

    /// Returns `true` if this `ParamMap` is mutable.
    pub const fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the map contains no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    fn check_mutable(&self) -> WaymarkResult<()> {
        if self.mutable {
            Ok(())
        } else {
            Err(WaymarkError::SuspiciousOperation(
                "This ParamMap instance is immutable".to_string(),
            ))
        }
    }
}

/// Decodes a percent-encoded string.
fn percent_decode(input: &str) -> String {
    // Replace + with space (form encoding), then decode percent sequences
    let plus_decoded = input.replace('+', " ");
    percent_encoding::percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Percent-encodes a string for use in a URL query.
fn percent_encode(input: &str) -> String {
    percent_encoding::utf8_percent_encode(input, percent_encoding::NON_ALPHANUMERIC).to_string()
}
