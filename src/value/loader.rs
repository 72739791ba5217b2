// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::rc::Rc;

use anyhow::{anyhow, Error};
use hashlink::LinkedHashMap;
use saphyr::{Yaml, YamlLoader};

use super::Value;

pub fn parse_yaml_str(input: &str) -> Result<Vec<Value>, Error> {
    let docs = YamlLoader::load_from_str(input)?;

    let mut values = Vec::new();
    for doc in &docs {
        let value = yaml_to_value(doc)?;
        values.push(value);
    }

    Ok(values)
}

pub fn yaml_to_value(yaml: &Yaml) -> Result<Value, Error> {
    match yaml {
        Yaml::Real(value) => Ok(Value::Real(Rc::new(value.clone()))),
        Yaml::Integer(value) => Ok(Value::Integer(*value)),
        Yaml::String(value) => Ok(Value::String(Rc::new(value.clone()))),
        Yaml::Boolean(value) => Ok(Value::Boolean(*value)),
        Yaml::Null => Ok(Value::Null),
        Yaml::Array(items) => {
            let mut values = Vec::new();
            for item in items {
                values.push(yaml_to_value(item)?);
            }
            Ok(Value::List(Rc::new(values)))
        }
        Yaml::Hash(hash) => {
            let mut map = LinkedHashMap::new();
            for (key, value) in hash {
                map.insert(yaml_to_value(key)?, yaml_to_value(value)?);
            }
            Ok(Value::Map(Rc::new(map)))
        }
        _ => Err(anyhow!("yaml aliases and invalid values are not supported")),
    }
}
