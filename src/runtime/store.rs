/// Path-addressable store shared by the scenes of one mounted program.
use std::collections::BTreeMap;
use thiserror::Error;

use crate::schema::value::Value;

/// Top-level key the initial snapshot is mounted under.
pub const ROOT_KEY: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no store entry {segment:?} at path {path:?}")]
    MissingSegment { path: Vec<String>, segment: String },
    #[error("store entry {segment:?} at path {path:?} is a {kind}, not a map")]
    NotAMap {
        path: Vec<String>,
        segment: String,
        kind: &'static str,
    },
}

/// A tree of values with a single map at the top holding [`ROOT_KEY`].
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    tree: BTreeMap<String, Value>,
}

impl Store {
    /// A fresh store rooted at a shallow copy of `initial`.
    pub fn new(initial: BTreeMap<String, Value>) -> Self {
        let mut tree = BTreeMap::new();
        tree.insert(ROOT_KEY.to_string(), Value::Map(initial));
        Self { tree }
    }

    /// Read-only handle on the map at `path`, walked from the top of the store.
    pub fn connect<S: AsRef<str>>(&self, path: &[S]) -> Result<Node<'_>, StoreError> {
        let mut node = &self.tree;
        for (depth, key) in path.iter().enumerate() {
            let key = key.as_ref();
            let next = node
                .get(key)
                .ok_or_else(|| missing(path, depth, key))?;
            node = next.as_map().ok_or_else(|| not_a_map(path, depth, key, next))?;
        }
        Ok(Node { entries: node })
    }

    /// Mutable handle on the map at `path`.
    pub fn connect_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Result<NodeMut<'_>, StoreError> {
        let mut node = &mut self.tree;
        for (depth, key) in path.iter().enumerate() {
            let key = key.as_ref();
            let next = node
                .get_mut(key)
                .ok_or_else(|| missing(path, depth, key))?;
            let kind = next.kind();
            node = next.as_map_mut().ok_or_else(|| StoreError::NotAMap {
                path: owned_prefix(path, depth),
                segment: key.to_string(),
                kind,
            })?;
        }
        Ok(NodeMut { entries: node })
    }

    /// Handle on the root snapshot.
    pub fn root(&self) -> Result<Node<'_>, StoreError> {
        self.connect(&[ROOT_KEY])
    }

    /// Mutable handle on the root snapshot.
    pub fn root_mut(&mut self) -> Result<NodeMut<'_>, StoreError> {
        self.connect_mut(&[ROOT_KEY])
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

fn owned_prefix<S: AsRef<str>>(path: &[S], depth: usize) -> Vec<String> {
    path[..depth].iter().map(|k| k.as_ref().to_string()).collect()
}

fn missing<S: AsRef<str>>(path: &[S], depth: usize, key: &str) -> StoreError {
    StoreError::MissingSegment {
        path: owned_prefix(path, depth),
        segment: key.to_string(),
    }
}

fn not_a_map<S: AsRef<str>>(path: &[S], depth: usize, key: &str, value: &Value) -> StoreError {
    StoreError::NotAMap {
        path: owned_prefix(path, depth),
        segment: key.to_string(),
        kind: value.kind(),
    }
}

/// Read-only view of one map in the store.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    entries: &'a BTreeMap<String, Value>,
}

impl<'a> Node<'a> {
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.entries.get(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&'a str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn entries(&self) -> &'a BTreeMap<String, Value> {
        self.entries
    }
}

/// Mutable view of one map in the store.
#[derive(Debug)]
pub struct NodeMut<'a> {
    entries: &'a mut BTreeMap<String, Value>,
}

impl NodeMut<'_> {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Store `value` under `key`, returning what was there before.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
