//! [`UserAttributes`] definitions.

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Authentication;

/// Multi-valued attributes of a user attached to an [`Authentication`].
///
/// Keys are iterated in their lexicographical order, while values of every
/// key keep the order (and duplicates) they were added with.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserAttributes(BTreeMap<String, Vec<String>>);

impl UserAttributes {
    /// Creates new empty [`UserAttributes`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all the values of the provided `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Appends the provided `value` to the values of the provided `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces all the values of the provided `key`, returning the previous
    /// ones.
    pub fn insert<V>(
        &mut self,
        key: impl Into<String>,
        values: V,
    ) -> Option<Vec<String>>
    where
        V: IntoIterator,
        V::Item: Into<String>,
    {
        self.0
            .insert(key.into(), values.into_iter().map(Into::into).collect())
    }

    /// Returns the number of keys in these [`UserAttributes`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether these [`UserAttributes`] have no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the keys and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Converts these [`UserAttributes`] into a plain map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl<K, V> FromIterator<(K, V)> for UserAttributes
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, values) in iter {
            _ = attrs.insert(key, values);
        }
        attrs
    }
}

impl From<BTreeMap<String, Vec<String>>> for UserAttributes {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl From<UserAttributes> for BTreeMap<String, Vec<String>> {
    fn from(attrs: UserAttributes) -> Self {
        attrs.0
    }
}

impl IntoIterator for UserAttributes {
    type Item = (String, Vec<String>);
    type IntoIter = btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod spec {
    use super::UserAttributes;

    #[test]
    fn keeps_values_order_and_duplicates() {
        let mut attrs = UserAttributes::new();
        attrs.add("cost_center", "b");
        attrs.add("cost_center", "a");
        attrs.add("cost_center", "b");

        assert_eq!(
            attrs.get("cost_center").unwrap(),
            ["b", "a", "b"].as_slice(),
        );
        assert!(attrs.get("manager").is_none());
    }

    #[test]
    fn insert_replaces_values() {
        let mut attrs = UserAttributes::new();
        attrs.add("k", "1");

        assert_eq!(attrs.insert("k", ["2", "3"]), Some(vec!["1".to_owned()]));
        assert_eq!(attrs.get("k").unwrap(), ["2", "3"].as_slice());
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn collects_from_pairs() {
        let attrs: UserAttributes =
            [("z", vec!["1"]), ("a", vec!["2", "2"])].into_iter().collect();

        assert_eq!(
            attrs.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            ["a", "z"],
        );
        assert_eq!(attrs.get("a").unwrap(), ["2", "2"].as_slice());
    }
}
