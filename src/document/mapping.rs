//! Insertion-ordered string-keyed mapping.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Value;

/// An ordered map from string keys to values.
///
/// Keys are unique; inserting an existing key replaces its value without
/// moving it. Two mappings are equal only if their entries match in order.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Follow a chain of keys through nested mappings.
    ///
    /// Returns `None` as soon as a key is missing or an intermediate value
    /// is not a mapping.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for key in parents {
            current = current.get(key)?.as_mapping()?;
        }
        current.get(last)
    }

    /// Follow a chain of keys and return the mapping found there.
    pub fn get_mapping(&self, path: &[&str]) -> Option<&Mapping> {
        self.get_path(path)?.as_mapping()
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get the child mapping under `key`, creating it when missing.
    ///
    /// A scalar stored under `key` is replaced by an empty mapping.
    pub fn child_mut(&mut self, key: &str) -> &mut Mapping {
        let slot = match self.entries.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                let slot = entry.into_mut();
                if !matches!(slot, Value::Mapping(_)) {
                    *slot = Value::Mapping(Mapping::new());
                }
                slot
            }
            Entry::Vacant(entry) => entry.insert(Value::Mapping(Mapping::new())),
        };

        match slot {
            Value::Mapping(m) => m,
            _ => unreachable!("child entry was just made a mapping"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut m = Mapping::new();
        m.insert("b", 1.0);
        m.insert("a", 2.0);
        m.insert("c", 3.0);

        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut m = Mapping::new();
        m.insert("a", 1.0);
        m.insert("b", 2.0);

        let previous = m.insert("a", "x");

        assert_eq!(previous, Some(Value::Number(1.0)));
        assert_eq!(m.len(), 2);
        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(m.get("a").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn test_get_path() {
        let mut root = Mapping::new();
        root.child_mut("traits")
            .child_mut("location")
            .insert("world", "world");

        assert_eq!(
            root.get_path(&["traits", "location", "world"])
                .and_then(Value::as_str),
            Some("world")
        );
        assert!(root.get_path(&["traits", "owner", "uuid"]).is_none());
        assert!(root.get_path(&["traits", "location", "world", "deeper"]).is_none());
        assert!(root.get_path(&[]).is_none());
    }

    #[test]
    fn test_child_mut_replaces_scalar() {
        let mut root = Mapping::new();
        root.insert("npc", "oops");

        root.child_mut("npc").insert("0", 1.0);

        assert_eq!(root.get_mapping(&["npc"]).map(Mapping::len), Some(1));
    }

    #[test]
    fn test_from_iterator() {
        let m: Mapping = [("x", 1.0), ("y", 2.0)].into_iter().collect();

        assert_eq!(m.len(), 2);
        assert_eq!(m.get("y").and_then(Value::as_f64), Some(2.0));
    }

    #[test]
    fn test_serialize_json_keeps_order() {
        let m: Mapping = [("z", Value::from(true)), ("a", Value::from("s"))]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&m).unwrap();

        assert_eq!(json, r#"{"z":true,"a":"s"}"#);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab: Mapping = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        let ba: Mapping = [("b", 2.0), ("a", 1.0)].into_iter().collect();

        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_many_entries_keep_order_and_lookups() {
        let mut m = Mapping::new();
        for i in 0..20_000i32 {
            m.child_mut(&format!("npc{i}")).insert("id", f64::from(i));
        }
        m.insert("npc5", "replaced");

        assert_eq!(m.len(), 20_000);
        assert_eq!(m.keys().nth(5), Some("npc5"));
        assert_eq!(m.get("npc5").and_then(Value::as_str), Some("replaced"));
        assert_eq!(
            m.get_path(&["npc19999", "id"]).and_then(Value::as_f64),
            Some(19_999.0)
        );
    }
}
