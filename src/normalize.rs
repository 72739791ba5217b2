// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use tracing::trace;

use crate::{
    error::NormalizeError,
    value::{MapLike, Value},
    yaml_doc::Mapping,
};

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Coerces map-like values into a `Mapping` of printable nodes.
#[derive(Clone, Copy, Debug)]
pub struct Normalizer {
    max_depth: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Normalizer {
    pub fn new() -> Normalizer {
        Normalizer::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Normalizer {
        Normalizer { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn normalize(&self, map: &dyn MapLike) -> Result<Mapping, NormalizeError> {
        self.normalize_at(map, 0)
    }

    /// Normalizes a dynamic top-level value, which must be map-like.
    pub fn normalize_value(&self, value: &Value) -> Result<Mapping, NormalizeError> {
        match value.as_map_like() {
            Some(map) => self.normalize(map),
            None => Err(NormalizeError::MalformedInput(format!(
                "top-level value must be a map, found {}",
                value.shape_name()
            ))),
        }
    }

    fn normalize_at(&self, map: &dyn MapLike, depth: usize) -> Result<Mapping, NormalizeError> {
        let mut mapping = Mapping::new();
        for (name, value) in map.string_entries()? {
            // Map-like shapes must be checked first.
            if let Some(child) = value.as_map_like() {
                if depth >= self.max_depth {
                    return Err(NormalizeError::MalformedInput(format!(
                        "'{}' exceeds the maximum nesting depth of {}",
                        name, self.max_depth
                    )));
                }

                trace!(key = %name, depth, "normalizing nested map");
                let child = self.normalize_at(child, depth + 1)?;
                mapping.add_map(name, child);
                continue;
            }

            match &value {
                Value::List(items) => {
                    let mut texts = Vec::new();
                    for item in items.iter() {
                        texts.push(scalar_text(&name, item)?);
                    }
                    mapping.add_sequence(name, texts);
                }
                _ => {
                    let text = scalar_text(&name, &value)?;
                    mapping.add_text(name, &text);
                }
            }
        }

        Ok(mapping)
    }
}

pub fn normalize(map: &dyn MapLike) -> Result<Mapping, NormalizeError> {
    Normalizer::new().normalize(map)
}

fn scalar_text(name: &str, value: &Value) -> Result<String, NormalizeError> {
    value.scalar_text().ok_or_else(|| NormalizeError::UnsupportedValueShape {
        key: name.to_string(),
        shape: value.shape_name(),
    })
}
