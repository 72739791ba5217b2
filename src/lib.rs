// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

//! Composes error notices as small YAML documents.
//!
//! Host data arrives as dynamically-typed [`value::Value`]s, is coerced into
//! a tree of printable nodes by [`normalize::Normalizer`] and rendered by
//! [`yaml_doc::Document`]. [`notifier::Notifier`] ties these together and
//! hands the finished payload to a [`transport::Transport`].

pub mod context;
pub mod error;
pub mod normalize;
pub mod notice;
pub mod notifier;
pub mod request;
pub mod transport;
pub mod value;
pub mod yaml_doc;

mod yaml_utils;
