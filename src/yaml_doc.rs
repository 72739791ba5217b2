// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Printer for the small YAML subset used by notice documents: scalar
// entries, block mappings and block sequences of scalars.
//
// A container writes the indent prefix of each child's first line. A node
// writes the prefixes of its own continuation lines.

#[cfg(test)]
mod tests;

use std::{borrow::Cow, fmt, ops::Add};

pub const INDENT_UNIT: &str = "  ";
pub const DOCUMENT_HEADER: &str = "---";
const NEWLINE: &str = "\r\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indent<'a> {
    unit: &'a str,
    depth: usize,
}

impl<'a> Indent<'a> {
    pub fn new(unit: &'a str) -> Indent<'a> {
        Indent { unit, depth: 0 }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Add<usize> for Indent<'_> {
    type Output = Self;

    fn add(self, levels: usize) -> Self {
        Indent {
            unit: self.unit,
            depth: self.depth + levels,
        }
    }
}

impl fmt::Display for Indent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str(self.unit)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Text(TextEntry),
    Sequence(SequenceEntry),
    Map(MapEntry),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Text(TextEntry { name, .. })
            | Node::Sequence(SequenceEntry { name, .. })
            | Node::Map(MapEntry { name, .. }) => name,
        }
    }

    pub fn render(&self, indent: Indent) -> String {
        match self {
            Node::Text(text) => text.render(indent),
            Node::Sequence(seq) => seq.render(indent),
            Node::Map(map) => map.render(indent),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextEntry {
    name: String,
    value: String,
}

impl TextEntry {
    pub fn new(name: impl Into<String>, value: &str) -> TextEntry {
        TextEntry {
            name: name.into(),
            value: value.trim().to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn render(&self, _indent: Indent) -> String {
        format!("{}: {}{}", format_key(&self.name), quote(&self.value), NEWLINE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SequenceEntry {
    name: String,
    items: Vec<String>,
}

impl SequenceEntry {
    pub fn new<I>(name: impl Into<String>, items: I) -> SequenceEntry
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        SequenceEntry {
            name: name.into(),
            items: items.into_iter().map(|item| item.as_ref().trim().to_string()).collect(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn render(&self, indent: Indent) -> String {
        let mut out = format!("{}:{}", format_key(&self.name), NEWLINE);

        let item_indent = indent + 1;
        for item in &self.items {
            out.push_str(&format!("{}- {}{}", item_indent, quote(item), NEWLINE));
        }

        out
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapEntry {
    name: String,
    value: Mapping,
}

impl MapEntry {
    pub fn new(name: impl Into<String>, value: Mapping) -> MapEntry {
        MapEntry {
            name: name.into(),
            value,
        }
    }

    pub fn value(&self) -> &Mapping {
        &self.value
    }

    pub fn render(&self, indent: Indent) -> String {
        let mut out = format!("{}:{}", format_key(&self.name), NEWLINE);

        let child_indent = indent + 1;
        for child in &self.value {
            out.push_str(&child_indent.to_string());
            out.push_str(&child.render(child_indent));
        }

        out
    }
}

/// Ordered list of named nodes. Names may repeat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    nodes: Vec<Node>,
}

impl Mapping {
    pub fn new() -> Mapping {
        Mapping::default()
    }

    pub fn add_text(&mut self, name: impl Into<String>, value: &str) -> &mut Self {
        self.nodes.push(Node::Text(TextEntry::new(name, value)));
        self
    }

    pub fn add_sequence<I>(&mut self, name: impl Into<String>, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.nodes.push(Node::Sequence(SequenceEntry::new(name, items)));
        self
    }

    pub fn add_map(&mut self, name: impl Into<String>, value: Mapping) -> &mut Self {
        self.nodes.push(Node::Map(MapEntry::new(name, value)));
        self
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Document {
        Document { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn render(&self) -> String {
        let indent = Indent::new(INDENT_UNIT);

        let mut out = format!("{}{}", DOCUMENT_HEADER, NEWLINE);
        for node in &self.nodes {
            out.push_str(&node.render(indent));
        }
        out
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// Double-quoted scalar with YAML escapes, so embedded quotes and line breaks
// cannot break the document structure.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn format_key(name: &str) -> Cow<'_, str> {
    if is_plain_key(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(quote(name))
    }
}

fn is_plain_key(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/'))
}
