//! `serde` support for [`Tree`], enabled by the `serde` feature.
//!
//! A tree serializes as a map with its keys in ascending order. Deserializing
//! puts every entry in turn so a repeated key keeps its last value.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::hibbard::Tree;

impl<K, V> Serialize for Tree<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.size()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct TreeVisitor<K, V> {
    marker: PhantomData<fn() -> Tree<K, V>>,
}

impl<'de, K, V> Visitor<'de> for TreeVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = Tree<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut tree = Tree::new();
        while let Some((key, value)) = access.next_entry()? {
            tree.put(key, value);
        }
        Ok(tree)
    }
}

impl<'de, K, V> Deserialize<'de> for Tree<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TreeVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_key_order() {
        let tree: Tree<_, _> = vec![("b", 2), ("c", 3), ("a", 1)].into_iter().collect();

        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2,"c":3}"#);
    }

    #[test]
    fn empty_tree_is_an_empty_map() {
        let tree: Tree<String, i32> = Tree::new();
        assert_eq!(serde_json::to_string(&tree).unwrap(), "{}");

        let tree: Tree<String, i32> = serde_json::from_str("{}").unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn deserializing_rebuilds_sizes() {
        let tree: Tree<String, i32> = serde_json::from_str(r#"{"m":1,"c":2,"x":3,"a":4}"#).unwrap();

        assert_eq!(tree.size(), 4);
        assert_eq!(tree.rank(&"m".to_string()), 2);
        assert_eq!(tree.select(0), Some(&"a".to_string()));
        tree.assert_invariants();
    }

    #[test]
    fn rejects_non_maps() {
        let result: Result<Tree<String, i32>, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());
    }
}
