// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("value of '{key}' has unsupported shape: {shape}")]
    UnsupportedValueShape { key: String, shape: &'static str },
    #[error("map key has unsupported shape: {shape}")]
    UnsupportedKeyShape { shape: &'static str },
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
