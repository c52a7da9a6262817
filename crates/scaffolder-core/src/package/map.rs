//! Ordered dependency map
//!
//! `package.json` dependency objects are written in the order this map stores
//! them. Sorting is an explicit step (`into_sorted`) rather than a property of
//! the container, so callers decide when order becomes canonical.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Dependency name -> version range, in iteration/serialization order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    entries: Vec<(String, String)>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An existing key keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) {
        let name = name.into();
        let version = version.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = version,
            None => self.entries.push((name, version)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// New map holding `self` with every entry of `additions` written over it
    pub fn overlay(&self, additions: &DependencyMap) -> DependencyMap {
        let mut merged = self.clone();
        for (name, version) in additions.iter() {
            merged.insert(name, version);
        }
        merged
    }

    /// Sort entries by name, byte-wise ascending
    pub fn into_sorted(mut self) -> DependencyMap {
        self.entries.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = DependencyMap::new();
        for (name, version) in iter {
            map.insert(name, version);
        }
        map
    }
}

impl Serialize for DependencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, version) in &self.entries {
            map.serialize_entry(name, version)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DependencyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DependencyMapVisitor;

        impl<'de> Visitor<'de> for DependencyMapVisitor {
            type Value = DependencyMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of dependency names to version ranges")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = DependencyMap::new();
                while let Some((name, version)) = access.next_entry::<String, String>()? {
                    map.insert(name, version);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(DependencyMapVisitor)
    }
}
