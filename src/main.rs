// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{anyhow, Context, Error};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use notice_yaml::{
    context::{set_entry, ContextFile},
    normalize::{Normalizer, DEFAULT_MAX_DEPTH},
    notifier::Notifier,
    transport::{Transport, WriterTransport},
    value::Value,
};

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let filter = if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:?}", err);
            ExitCode::from(1)
        }
    }
}

fn cli() -> Command {
    Command::new("notice-yaml")
        .about("Compose an error notice document from a failure context file")
        .arg(
            Arg::new("context")
                .long("context")
                .short('c')
                .value_name("FILE")
                .help("YAML file describing the failure")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("label")
                .long("label")
                .value_name("TEXT")
                .help("Error category, overrides the context file"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("Collector API key")
                .env("NOTICE_API_KEY")
                .hide_env_values(true),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .value_name("NAME=VALUE")
                .help("Query string parameter, may repeat")
                .value_parser(parse_name_value)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("form")
                .long("form")
                .value_name("NAME=VALUE")
                .help("Form field, may repeat")
                .value_parser(parse_name_value)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("session")
                .long("session")
                .value_name("NAME=VALUE")
                .help("Session variable, may repeat")
                .value_parser(parse_name_value)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("process-env")
                .long("process-env")
                .help("Append this process's environment variables")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_name("N")
                .help("Maximum nesting depth of request, session and environment data")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Write the notice here instead of stdout")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log at debug level")
                .action(ArgAction::SetTrue),
        )
}

fn parse_name_value(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, found '{}'", arg)),
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let context_file = matches
        .get_one::<PathBuf>("context")
        .ok_or_else(|| anyhow!("missing context file"))?;
    debug!(path = %context_file.display(), "loading context");
    let mut context = ContextFile::load(context_file)?;
    apply_overrides(matches, &mut context)?;

    let max_depth = matches.get_one::<usize>("max-depth").copied().unwrap_or(DEFAULT_MAX_DEPTH);
    let normalizer = Normalizer::with_max_depth(max_depth);
    let api_key = matches.get_one::<String>("api-key").cloned().unwrap_or_default();

    match matches.get_one::<PathBuf>("output") {
        Some(output) => {
            let file = File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
            send(WriterTransport::new(BufWriter::new(file)), &api_key, normalizer, &context)
        }
        None => send(WriterTransport::new(io::stdout().lock()), &api_key, normalizer, &context),
    }
}

// Command-line values replace context file entries in place and append
// new ones at the end.
fn apply_overrides(matches: &ArgMatches, context: &mut ContextFile) -> Result<(), Error> {
    if let Some(label) = matches.get_one::<String>("label") {
        context.label = label.clone();
    }

    if let Some(query) = matches.get_many::<(String, String)>("query") {
        context.merge_request_pairs("QueryString", query.cloned())?;
    }

    if let Some(form) = matches.get_many::<(String, String)>("form") {
        context.merge_request_pairs("Form", form.cloned())?;
    }

    if let Some(session) = matches.get_many::<(String, String)>("session") {
        for (name, value) in session {
            set_entry(&mut context.session, name.clone(), Value::string(value.as_str()));
        }
    }

    if matches.get_flag("process-env") {
        for (name, value) in std::env::vars() {
            set_entry(&mut context.environment, name, Value::from(value));
        }
    }

    Ok(())
}

fn send<T: Transport>(transport: T, api_key: &str, normalizer: Normalizer, context: &ContextFile) -> Result<(), Error> {
    let mut notifier = Notifier::new(api_key, transport).with_normalizer(normalizer);
    notifier.notify(&context.label, &context.faults, &context.as_notice_context())
}
