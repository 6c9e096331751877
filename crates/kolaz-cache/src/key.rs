//! Hierarchical query keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A query key such as `["products", "single", "IRT-DJ-001"]`.
///
/// Keys are compared segment by segment, so `["products"]` is a prefix of
/// every product query and can invalidate all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Append a segment.
    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Check whether every segment of `prefix` leads this key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

impl From<&[&str]> for QueryKey {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let key = QueryKey::new(["products", "single"]).with("IRT-DJ-001");
        assert_eq!(key.to_string(), "products:single:IRT-DJ-001");
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let key = QueryKey::new(["products", "featured"]);
        assert!(key.starts_with(&QueryKey::new(["products"])));
        assert!(key.starts_with(&key));
        assert!(!key.starts_with(&QueryKey::new(["prod"])));
        assert!(!QueryKey::new(["products"]).starts_with(&key));
    }
}
