// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Failure description loaded from a YAML context file.


use std::path::Path;

use anyhow::{anyhow, Error};
use hashlink::LinkedHashMap;

use crate::{
    notice::{Fault, NoticeContext},
    value::{parse_yaml_str, MultiMap, Value},
    yaml_utils::yaml_load_from_file,
};

pub const DEFAULT_LABEL: &str = "Unhandled";

#[derive(Clone, Debug, PartialEq)]
pub struct ContextFile {
    pub label: String,
    // Innermost cause first.
    pub faults: Vec<Fault>,
    pub request: LinkedHashMap<String, Value>,
    pub session: LinkedHashMap<String, Value>,
    pub environment: LinkedHashMap<String, Value>,
}

impl Default for ContextFile {
    fn default() -> Self {
        ContextFile {
            label: DEFAULT_LABEL.to_string(),
            faults: Vec::new(),
            request: LinkedHashMap::new(),
            session: LinkedHashMap::new(),
            environment: LinkedHashMap::new(),
        }
    }
}

impl ContextFile {
    pub fn load(filename: &Path) -> Result<ContextFile, Error> {
        let docs = yaml_load_from_file(filename)?;
        Self::from_docs(docs)
    }

    pub fn parse(input: &str) -> Result<ContextFile, Error> {
        let docs = parse_yaml_str(input)?;
        Self::from_docs(docs)
    }

    pub fn as_notice_context(&self) -> NoticeContext<'_> {
        NoticeContext {
            request: &self.request,
            session: &self.session,
            environment: &self.environment,
        }
    }

    /// Appends name/value pairs to a multi-valued request field such as
    /// `QueryString`. Pairs already in the field keep their position.
    pub fn merge_request_pairs<I>(&mut self, field: &str, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut multimap = MultiMap::new();
        if let Some(existing) = self.request.get(field) {
            if *existing != Value::Null {
                let Some(entries) = existing.as_map_like() else {
                    return Err(anyhow!("'{}' must be a map, found {}", field, existing.shape_name()));
                };

                for (name, value) in entries.string_entries()? {
                    match &value {
                        Value::List(items) => {
                            for item in items.iter() {
                                multimap.add(name.as_str(), expect_text(field, item)?);
                            }
                        }
                        _ => multimap.add(name, expect_text(field, &value)?),
                    }
                }
            }
        }

        for (name, value) in pairs {
            multimap.add(name, value);
        }

        set_entry(&mut self.request, field.to_string(), Value::from(multimap));
        Ok(())
    }

    fn from_docs(docs: Vec<Value>) -> Result<ContextFile, Error> {
        let root = match &docs[..] {
            [] => Value::Null,
            [root] => root.clone(),
            _ => return Err(anyhow!("context yaml must only have a single document")),
        };

        let mut context = ContextFile::default();
        if root == Value::Null {
            return Ok(context);
        }

        let Some(root_map) = root.as_map_like() else {
            return Err(anyhow!("context yaml must be a map, found {}", root.shape_name()));
        };

        for (key, value) in root_map.string_entries()? {
            match key.as_str() {
                "label" => context.label = expect_text("label", &value)?,
                "errors" => context.faults = parse_faults(&value)?,
                "request" => context.request = expect_map("request", &value)?,
                "session" => context.session = expect_map("session", &value)?,
                "environment" => context.environment = expect_map("environment", &value)?,
                _ => return Err(anyhow!("unknown context field '{}'", key)),
            }
        }

        Ok(context)
    }
}

fn parse_faults(value: &Value) -> Result<Vec<Fault>, Error> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::List(items) => items,
        _ => return Err(anyhow!("'errors' must be a list, found {}", value.shape_name())),
    };

    let mut faults = Vec::new();
    for item in items.iter() {
        // A bare scalar is a message without a stack trace.
        let Some(fields) = item.as_map_like() else {
            let message = expect_text("errors", item)?;
            faults.push(Fault::new(message, ""));
            continue;
        };

        let mut fault = Fault::new("", "");
        for (key, value) in fields.string_entries()? {
            match key.as_str() {
                "message" => fault.message = expect_text("message", &value)?,
                "backtrace" => fault.stack_trace = expect_lines("backtrace", &value)?,
                _ => return Err(anyhow!("unknown error field '{}'", key)),
            }
        }
        faults.push(fault);
    }

    Ok(faults)
}

fn expect_text(field: &str, value: &Value) -> Result<String, Error> {
    value
        .scalar_text()
        .ok_or_else(|| anyhow!("'{}' must be a scalar, found {}", field, value.shape_name()))
}

// Either a single multi-line string or a list of lines.
fn expect_lines(field: &str, value: &Value) -> Result<String, Error> {
    let Value::List(lines) = value else {
        return expect_text(field, value);
    };

    let mut texts = Vec::new();
    for line in lines.iter() {
        texts.push(expect_text(field, line)?);
    }
    Ok(texts.join("\n"))
}

fn expect_map(field: &str, value: &Value) -> Result<LinkedHashMap<String, Value>, Error> {
    if *value == Value::Null {
        return Ok(LinkedHashMap::new());
    }

    let Some(map) = value.as_map_like() else {
        return Err(anyhow!("'{}' must be a map, found {}", field, value.shape_name()));
    };

    let mut entries = LinkedHashMap::new();
    for (key, value) in map.string_entries()? {
        set_entry(&mut entries, key, value);
    }
    Ok(entries)
}

/// Sets `key` to `value`. An existing key keeps its position.
pub fn set_entry(map: &mut LinkedHashMap<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(slot) => *slot = value,
        None => {
            map.insert(key, value);
        }
    }
}
