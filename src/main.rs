use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use ariadne::Source;
use clap::{Parser as ClapParser, Subcommand};
use tagjson::{JsonValue, Serializer};
use tracing::*;

use crate::config::Config;
use crate::payload::Field;
use crate::request::Request;
use crate::transport::ReplayTransport;

mod config;
mod diagnostics;
mod logging;
mod payload;
mod request;
mod response;
mod transport;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Without it, `resultpost.toml` in the working directory
    /// is used if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a JSON document and point at the first place it is malformed.
    Check {
        /// The path to a JSON file.
        input: PathBuf,
    },
    /// Parse a JSON document and print it back in canonical form.
    Fmt {
        /// The path to a JSON file.
        input: PathBuf,
        /// One element per line instead of a single line.
        #[arg(long)]
        pretty: bool,
    },
    /// Build an object payload from `key=value` fields and print it.
    Build {
        /// Values are read as JSON when possible, otherwise as strings.
        #[arg(value_parser = payload::parse_field)]
        fields: Vec<Field>,
        #[arg(long)]
        pretty: bool,
    },
    /// Build a payload, send it, then parse and validate the response.
    Send {
        /// Target URL, or an endpoint path when `base_url` is configured.
        #[arg(long)]
        url: String,
        /// File holding the response body to replay.
        #[arg(long)]
        response: PathBuf,
        /// Query parameter `key=value`; repeatable.
        #[arg(long = "param", value_parser = request::parse_param)]
        params: Vec<(String, String)>,
        /// Request header `Name: value`; repeatable.
        #[arg(long = "header", value_parser = request::parse_header)]
        headers: Vec<(String, String)>,
        #[arg(value_parser = payload::parse_field)]
        fields: Vec<Field>,
    },
}

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(?cli);

    let config = Config::load(cli.config.as_deref())?;

    debug!(?config);

    match cli.command {
        Command::Check { input } => {
            let value = read_and_parse(&config, &input)?;
            println!("{}: ok ({})", input.display(), value.kind());
        }
        Command::Fmt { input, pretty } => {
            let value = read_and_parse(&config, &input)?;
            println!("{}", serialize(&config, &value, pretty)?);
        }
        Command::Build { fields, pretty } => {
            let payload = payload::build_payload(&fields)?;
            println!("{}", serialize(&config, &payload, pretty)?);
        }
        Command::Send {
            url,
            response,
            params,
            headers,
            fields,
        } => {
            let payload = payload::build_payload(&fields)?;

            let url = match &config.base_url {
                Some(base) => request::build_url(base, &url),
                None => url,
            };
            let mut req = Request::new(url).query(&params);
            for header in &config.headers {
                let (name, value) = request::parse_header(header)
                    .with_context(|| format!("invalid header `{header}` in configuration"))?;
                req = req.header(&name, &value);
            }
            for (name, value) in &headers {
                req = req.header(name, value);
            }

            let transport = ReplayTransport::new(response);
            let reply = transport::exchange(&transport, &req, &payload, config.max_depth)?;
            println!("{}", serialize(&config, &reply, true)?);
        }
    }

    Ok(())
}

fn read_and_parse(config: &Config, input: &Path) -> anyhow::Result<JsonValue> {
    let src = match std::fs::read_to_string(input) {
        Ok(file) => file,
        Err(e) => {
            error!(path = ?input, "failed to read input");
            return Err(e).with_context(|| format!("failed to read file `{}`", input.display()));
        }
    };

    let path = input.display().to_string();

    match tagjson::from_str_with_limit(&src, config.max_depth) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!(?e);
            diagnostics::parse_error_report(&path, &src, &e).print((&path, Source::from(&src)))?;
            bail!("failed to parse `{path}`");
        }
    }
}

fn serialize(config: &Config, value: &JsonValue, pretty: bool) -> anyhow::Result<String> {
    let mut ser = Serializer::new().max_depth(config.max_depth);
    if pretty {
        ser = ser.pretty(config.indent);
    }
    ser.to_string(value).context("failed to serialize JSON")
}
