// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Hand-off point between the composed notice and whatever delivers it.

use std::io::Write;

use anyhow::Error;

use crate::yaml_doc::Document;

pub const CONTENT_TYPE: &str = "application/x-yaml";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Payload {
    pub fn from_document(doc: &Document) -> Payload {
        Payload {
            content_type: CONTENT_TYPE,
            body: doc.render().into_bytes(),
        }
    }
}

pub trait Transport {
    fn send(&mut self, payload: &Payload) -> Result<(), Error>;
}

/// Writes each payload body to an `io::Write` sink.
pub struct WriterTransport<W> {
    writer: W,
}

impl<W: Write> WriterTransport<W> {
    pub fn new(writer: W) -> WriterTransport<W> {
        WriterTransport { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for WriterTransport<W> {
    fn send(&mut self, payload: &Payload) -> Result<(), Error> {
        self.writer.write_all(&payload.body)?;
        self.writer.flush()?;
        Ok(())
    }
}
