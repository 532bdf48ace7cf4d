//! Documents and the list of fields a search looks at.

use ahash::AHashMap;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// A mapping from field name to free text.
///
/// A missing field reads as `None`, which matching treats the same as empty
/// text.
pub trait Document {
    /// Returns the text of `name`, if the document has it.
    fn field(&self, name: &str) -> Option<&str>;
}

impl<D: Document + ?Sized> Document for &D {
    fn field(&self, name: &str) -> Option<&str> {
        (**self).field(name)
    }
}

impl<S: std::hash::BuildHasher> Document for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Document for AHashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Document for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Only string members count as text; numbers, arrays and nested objects read as absent.
impl Document for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}

/// A JSON value is a document only when it is an object.
impl Document for Value {
    fn field(&self, name: &str) -> Option<&str> {
        self.as_object().and_then(|object| object.field(name))
    }
}

/// Ordered, duplicate-free list of field names a search considers.
///
/// Fields of a document that are not in the list never participate in
/// matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList {
    names: Vec<String>,
}

/// Fields searched when the caller configures none.
pub const DEFAULT_FIELDS: &[&str] = &["title", "content"];

impl FieldList {
    /// Builds a field list, keeping the first occurrence of each name.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        for name in names {
            let name = name.into();
            if !list.contains(&name) {
                list.push(name);
            }
        }
        Self { names: list }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for FieldList {
    fn default() -> Self {
        Self::new(DEFAULT_FIELDS.iter().copied())
    }
}

impl<S: Into<String>> FromIterator<S> for FieldList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
