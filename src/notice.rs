// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Assembles the notice report document from an error chain and the request,
// session and environment data collected by the host.


use std::backtrace::BacktraceStatus;

use crate::{
    error::NormalizeError,
    normalize::Normalizer,
    value::MapLike,
    yaml_doc::{Document, MapEntry, Mapping, Node},
};

/// One error of a cause chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fault {
    pub message: String,
    pub stack_trace: String,
}

impl Fault {
    pub fn new(message: impl Into<String>, stack_trace: impl Into<String>) -> Fault {
        Fault {
            message: message.into(),
            stack_trace: stack_trace.into(),
        }
    }

    /// Flattens an error's cause chain, innermost cause first. A captured
    /// backtrace is attached to the root cause.
    pub fn chain_from_error(err: &anyhow::Error) -> Vec<Fault> {
        let mut faults: Vec<Fault> = err.chain().map(|cause| Fault::new(cause.to_string(), "")).collect();
        faults.reverse();

        let backtrace = err.backtrace();
        if backtrace.status() == BacktraceStatus::Captured {
            if let Some(root) = faults.first_mut() {
                root.stack_trace = backtrace.to_string();
            }
        }

        faults
    }
}

pub struct NoticeContext<'a> {
    pub request: &'a dyn MapLike,
    pub session: &'a dyn MapLike,
    pub environment: &'a dyn MapLike,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    api_key: String,
    error_message: String,
    backtrace: Vec<String>,
    request: Mapping,
    session: Mapping,
    environment: Mapping,
}

impl Notice {
    /// `faults` must be ordered innermost cause first.
    pub fn compose(
        api_key: &str,
        label: &str,
        faults: &[Fault],
        context: &NoticeContext,
        normalizer: &Normalizer,
    ) -> Result<Notice, NormalizeError> {
        let request = normalizer.normalize(context.request)?;
        let session = normalizer.normalize(context.session)?;
        let environment = normalizer.normalize(context.environment)?;

        let notice = Notice {
            api_key: api_key.to_string(),
            error_message: format_error_message(label, faults),
            backtrace: collect_backtrace(faults),
            request,
            session,
            environment,
        };
        Ok(notice)
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn backtrace(&self) -> &[String] {
        &self.backtrace
    }

    pub fn to_document(&self) -> Document {
        let mut notice = Mapping::new();
        notice
            .add_text("api_key", &self.api_key)
            .add_text("error_message", &self.error_message)
            .add_sequence("backtrace", &self.backtrace)
            .add_map("request", self.request.clone())
            .add_map("session", self.session.clone())
            .add_map("environment", self.environment.clone());

        Document::new(vec![Node::Map(MapEntry::new("notice", notice))])
    }
}

pub fn format_error_message(label: &str, faults: &[Fault]) -> String {
    let mut message = format!("{} Error:\r\n", label);
    for fault in faults {
        message.push_str(&fault.message);
        message.push_str("\r\n");
    }
    message
}

pub fn collect_backtrace(faults: &[Fault]) -> Vec<String> {
    faults
        .iter()
        .flat_map(|fault| fault.stack_trace.lines())
        .map(|line| line.trim().to_string())
        .collect()
}
