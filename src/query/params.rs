//! Request query parameters as an ordered multi-map.

use std::collections::BTreeMap;

/// Query-string parameters keyed by name. Keys iterate in lexicographic order so that
/// anything compiled from them is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    inner: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Append a value; repeated keys keep every value in arrival order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// First value submitted for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.inner.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.inner.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_wins() {
        let params: QueryParams = [("email", "a"), ("email", "b")].into_iter().collect();
        assert_eq!(params.first("email"), Some("a"));
        let (_, values) = params.iter().next().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn keys_iterate_sorted() {
        let params: QueryParams = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    #[test]
    fn remove_takes_all_values() {
        let mut params: QueryParams = [("limit", "5"), ("name", "x")].into_iter().collect();
        assert_eq!(params.remove("limit"), Some(vec!["5".to_string()]));
        assert!(params.first("limit").is_none());
        assert_eq!(params.len(), 1);
    }
}
