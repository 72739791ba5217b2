// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Dynamically-typed data handed over by the host application.

mod loader;

#[cfg(test)]
mod tests;

use std::rc::Rc;

use hashlink::LinkedHashMap;

use crate::error::NormalizeError;

pub use loader::{parse_yaml_str, yaml_to_value};

pub type StringEntries = Vec<(String, Value)>;

#[derive(Clone, PartialEq, Debug, Eq, Hash)]
pub enum Value {
    Null,
    String(Rc<String>),
    Integer(i64),
    // Numbers that don't fit in an i64 (e.g. floating point).
    Real(Rc<String>),
    Boolean(bool),
    List(Rc<Vec<Value>>),
    Map(Rc<LinkedHashMap<Value, Value>>),
    MultiMap(Rc<MultiMap>),
    Pairs(Rc<Vec<(Value, Value)>>),
    Bytes(Rc<Vec<u8>>),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Value {
        Value::String(Rc::new(value.into()))
    }

    pub fn list<I>(items: I) -> Value
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    pub fn map<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Value::Map(Rc::new(map))
    }

    pub fn pairs<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let pairs = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Value::Pairs(Rc::new(pairs))
    }

    pub fn bytes(data: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(Rc::new(data.into()))
    }

    /// Short name of the value's runtime shape, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Boolean(_) => "boolean",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::MultiMap(_) => "multimap",
            Value::Pairs(_) => "pairs",
            Value::Bytes(_) => "bytes",
        }
    }

    /// Returns the key/value view of any associative shape.
    pub fn as_map_like(&self) -> Option<&dyn MapLike> {
        match self {
            Value::Map(map) => Some(map.as_ref()),
            Value::MultiMap(multimap) => Some(multimap.as_ref()),
            Value::Pairs(pairs) => Some(pairs.as_ref()),
            Value::Null
            | Value::String(_)
            | Value::Integer(_)
            | Value::Real(_)
            | Value::Boolean(_)
            | Value::List(_)
            | Value::Bytes(_) => None,
        }
    }

    /// Display text of a scalar. Null is the empty string.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Value::Null => Some(String::new()),
            Value::String(value) | Value::Real(value) => Some(value.as_ref().clone()),
            Value::Integer(value) => Some(value.to_string()),
            Value::Boolean(value) => Some(value.to_string()),
            Value::List(_) | Value::Map(_) | Value::MultiMap(_) | Value::Pairs(_) | Value::Bytes(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Rc::new(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<MultiMap> for Value {
    fn from(value: MultiMap) -> Self {
        Value::MultiMap(Rc::new(value))
    }
}

impl From<LinkedHashMap<String, Value>> for Value {
    fn from(value: LinkedHashMap<String, Value>) -> Self {
        Value::map(value)
    }
}

/// String-keyed collection where a key may carry several values, such as
/// submitted form fields or query string parameters.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct MultiMap {
    entries: LinkedHashMap<String, Vec<String>>,
}

impl MultiMap {
    pub fn new() -> MultiMap {
        MultiMap::default()
    }

    /// Appends a value. A repeated key keeps its first position.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.entries.get_mut(&key) {
            Some(values) => values.push(value.into()),
            None => {
                self.entries.insert(key, vec![value.into()]);
            }
        }
    }

    /// All values of `key`, joined with commas.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|values| values.join(","))
    }

    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(|values| values.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MultiMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut multimap = MultiMap::new();
        for (key, value) in iter {
            multimap.add(key, value);
        }
        multimap
    }
}

/// An associative container that can be viewed as ordered pairs of string
/// keys and values.
pub trait MapLike {
    fn string_entries(&self) -> Result<StringEntries, NormalizeError>;
}

impl MapLike for LinkedHashMap<Value, Value> {
    fn string_entries(&self) -> Result<StringEntries, NormalizeError> {
        self.iter()
            .map(|(key, value)| Ok((key_text(key)?, value.clone())))
            .collect()
    }
}

impl MapLike for LinkedHashMap<String, Value> {
    fn string_entries(&self) -> Result<StringEntries, NormalizeError> {
        Ok(self.iter().map(|(key, value)| (key.clone(), value.clone())).collect())
    }
}

impl MapLike for Vec<(Value, Value)> {
    fn string_entries(&self) -> Result<StringEntries, NormalizeError> {
        self.iter()
            .map(|(key, value)| Ok((key_text(key)?, value.clone())))
            .collect()
    }
}

impl MapLike for MultiMap {
    fn string_entries(&self) -> Result<StringEntries, NormalizeError> {
        let entries = self
            .entries
            .iter()
            .map(|(key, values)| {
                let value = match &values[..] {
                    [] => Value::Null,
                    _ => Value::string(values.join(",")),
                };
                (key.clone(), value)
            })
            .collect();
        Ok(entries)
    }
}

fn key_text(key: &Value) -> Result<String, NormalizeError> {
    key.scalar_text().ok_or(NormalizeError::UnsupportedKeyShape {
        shape: key.shape_name(),
    })
}
