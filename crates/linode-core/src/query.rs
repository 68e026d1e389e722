//! Query string assembly for list requests.
//!
//! Collects `(key, value)` pairs in insertion order so the transport can hand them to the
//! HTTP client unchanged.

use std::fmt::Display;

/// Ordered collection of query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a parameter.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Return the collected pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn keeps_insertion_order() {
        let mut params = QueryParams::new();
        params.push("page", 2);
        params.push("page_size", 100);
        assert_eq!(
            params.into_pairs(),
            vec![("page", "2".to_string()), ("page_size", "100".to_string())]
        );
    }
}
