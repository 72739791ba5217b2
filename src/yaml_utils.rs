// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{fs, path::Path};

use anyhow::{Context, Error};

use crate::value::{parse_yaml_str, Value};

pub fn yaml_load_from_file(filename: &Path) -> Result<Vec<Value>, Error> {
    let input = fs::read_to_string(filename).with_context(|| format!("failed to read {}", filename.display()))?;
    let docs = parse_yaml_str(&input).with_context(|| format!("failed to parse {}", filename.display()))?;
    Ok(docs)
}
