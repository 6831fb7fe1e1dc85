//! Bound variables handed to the job executor.
//!
//! A [`VariableMap`] is the output of one bind: variable names mapped to
//! values, with the secret ones remembered so the executor can redact them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::process::Command;

use zeroize::Zeroizing;

/// Variable name to value map, last write wins.
///
/// Values are wiped from memory when the map is dropped.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    values: BTreeMap<String, Zeroizing<String>>,
    secret: BTreeSet<String>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a plain value, replacing any earlier value under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.secret.remove(&name);
        self.values.insert(name, Zeroizing::new(value.into()));
    }

    /// Insert a value that must never appear in job output.
    pub fn insert_secret(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.secret.insert(name.clone());
        self.values.insert(name, Zeroizing::new(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether `name` holds a secret value.
    pub fn is_secret(&self, name: &str) -> bool {
        self.secret.contains(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values the executor must mask in job output.
    pub fn secret_values(&self) -> impl Iterator<Item = &str> {
        self.secret
            .iter()
            .filter_map(|name| self.values.get(name))
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Merge `other` into this map; its entries win on collision.
    pub fn extend(&mut self, other: VariableMap) {
        for (name, value) in other.values {
            if other.secret.contains(&name) {
                self.secret.insert(name.clone());
            } else {
                self.secret.remove(&name);
            }
            self.values.insert(name, value);
        }
    }

    /// Inject every variable into a child process environment.
    pub fn apply(&self, cmd: &mut Command) {
        for (name, value) in self.iter() {
            cmd.env(name, value);
        }
    }
}

impl fmt::Debug for VariableMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
