// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use anyhow::Error;
use tracing::{debug, info};

use crate::{
    normalize::Normalizer,
    notice::{Fault, Notice, NoticeContext},
    transport::{Payload, Transport},
};

/// Composes notices for observed failures and hands them to a transport.
pub struct Notifier<T> {
    api_key: String,
    normalizer: Normalizer,
    transport: T,
}

impl<T: Transport> Notifier<T> {
    pub fn new(api_key: impl Into<String>, transport: T) -> Notifier<T> {
        Notifier {
            api_key: api_key.into(),
            normalizer: Normalizer::new(),
            transport,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// `faults` must be ordered innermost cause first. Nothing is sent if
    /// any of the context maps fails to normalize.
    pub fn notify(&mut self, label: &str, faults: &[Fault], context: &NoticeContext) -> Result<(), Error> {
        debug!(label, faults = faults.len(), "composing notice");
        let notice = Notice::compose(&self.api_key, label, faults, context, &self.normalizer)?;

        let payload = Payload::from_document(&notice.to_document());
        info!(
            label,
            bytes = payload.body.len(),
            content_type = payload.content_type,
            "sending notice"
        );
        self.transport.send(&payload)?;
        Ok(())
    }

    pub fn notify_error(&mut self, label: &str, err: &Error, context: &NoticeContext) -> Result<(), Error> {
        let faults = Fault::chain_from_error(err);
        self.notify(label, &faults, context)
    }
}
