//! The `{set, del}` diff keyed by path.
//!
//! On the wire a diff looks like
//! `{"set": {"a.b": 1}, "del": {"a.c": null}}`; deletions are a map whose
//! values are ignored. Both keys are optional when deserializing.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::prefix_path;

/// An incremental change: values to assign and paths to remove.
///
/// Entries keep insertion order, so anything derived from a diff (split
/// outputs, bounced remainders) iterates deterministically. Equality ignores
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "V: Serialize", deserialize = "V: Deserialize<'de>"))]
pub struct Diff<V> {
    #[serde(default)]
    pub set: IndexMap<String, V>,
    #[serde(default, with = "null_map")]
    pub del: IndexSet<String>,
}

impl<V> Default for Diff<V> {
    fn default() -> Self {
        Self {
            set: IndexMap::new(),
            del: IndexSet::new(),
        }
    }
}

impl<V> Diff<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the diff neither sets nor deletes anything.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.del.is_empty()
    }

    /// Number of fragments (set entries plus deletions).
    pub fn len(&self) -> usize {
        self.set.len() + self.del.len()
    }

    /// Assigns `value` at `path`, replacing any earlier value for that path.
    pub fn insert(&mut self, path: impl Into<String>, value: V) -> Option<V> {
        self.set.insert(path.into(), value)
    }

    /// Marks `path` for removal.
    pub fn remove(&mut self, path: impl Into<String>) -> bool {
        self.del.insert(path.into())
    }

    /// Builder form of [`Diff::insert`].
    pub fn with_set(mut self, path: impl Into<String>, value: V) -> Self {
        self.insert(path, value);
        self
    }

    /// Builder form of [`Diff::remove`].
    pub fn with_del(mut self, path: impl Into<String>) -> Self {
        self.remove(path);
        self
    }

    /// All paths touched by the diff: set paths first, then deletions.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.set
            .keys()
            .map(String::as_str)
            .chain(self.del.iter().map(String::as_str))
    }

    /// Paths present in both `set` and `del`.
    pub fn conflicts(&self) -> Vec<&str> {
        self.set
            .keys()
            .filter(|path| self.del.contains(path.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Folds a later diff into this one.
    ///
    /// A later set of a path cancels an earlier deletion of it and the other
    /// way round, so the result never carries a conflict that `later` did not
    /// carry itself.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor_path::Diff;
    ///
    /// let mut diff = Diff::new().with_set("a", 1).with_del("b");
    /// diff.merge(Diff::new().with_set("b", 2).with_del("a"));
    /// assert_eq!(diff, Diff::new().with_set("b", 2).with_del("a"));
    /// ```
    pub fn merge(&mut self, later: Diff<V>) {
        for (path, value) in later.set {
            self.del.shift_remove(&path);
            self.set.insert(path, value);
        }
        for path in later.del {
            self.set.shift_remove(&path);
            self.del.insert(path);
        }
    }

    /// Rewrites every path with `f`; fragments for which `f` returns `None`
    /// are dropped.
    pub fn map_paths<F>(self, mut f: F) -> Diff<V>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let set = self
            .set
            .into_iter()
            .filter_map(|(path, value)| f(&path).map(|path| (path, value)))
            .collect();
        let del = self.del.into_iter().filter_map(|path| f(&path)).collect();
        Diff { set, del }
    }

    /// Prepends `prefix` to every path.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor_path::Diff;
    ///
    /// let diff = Diff::new().with_set("click", 1).prefix_paths("childNodes.0:button");
    /// assert!(diff.set.contains_key("childNodes.0:button.click"));
    /// ```
    pub fn prefix_paths(self, prefix: &str) -> Diff<V> {
        self.map_paths(|path| Some(prefix_path(prefix, path)))
    }
}

mod null_map {
    use indexmap::{IndexMap, IndexSet};
    use serde::de::IgnoredAny;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(paths: &IndexSet<String>, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(paths.len()))?;
        for path in paths {
            map.serialize_entry(path, &())?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<IndexSet<String>, D::Error> {
        let map = IndexMap::<String, IgnoredAny>::deserialize(deserializer)?;
        Ok(map.into_keys().collect())
    }
}
