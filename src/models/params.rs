//! Query parameters for resource calls
//!
//! Parameters are held in key order, so two maps built from the same pairs in
//! any insertion order compare and serialize identically.

use std::collections::BTreeMap;

use serde::Serialize;

/// String-valued query parameter map, kept sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Numbers and booleans are stringified.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let a = Params::new().with("origin", "BCN").with("destination", "JFK");
        let b = Params::new().with("destination", "JFK").with("origin", "BCN");

        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_values_are_stringified() {
        let params = Params::new()
            .with("adults", 2)
            .with("nonStop", true)
            .with("latitude", 41.39);

        assert_eq!(params.get("adults"), Some("2"));
        assert_eq!(params.get("nonStop"), Some("true"));
        assert_eq!(params.get("latitude"), Some("41.39"));
    }

    #[test]
    fn test_from_iterator_last_value_wins() {
        let params: Params = vec![("max", "5"), ("max", "10")].into_iter().collect();

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("max"), Some("10"));
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let params = Params::new().with("b", 1).with("a", 2).with("c", 3);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
