use std::path::Path;

use anyhow::{bail, Context};
use confique::Config as DeriveConfig;

/// Looked up in the working directory when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "resultpost.toml";

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// Deepest container nesting accepted when parsing and produced when serializing. Anything
    /// deeper is rejected instead of risking the stack.
    #[config(env = "RESULTPOST_MAX_DEPTH", default = 1000)]
    pub max_depth: usize,

    /// Spaces per nesting level for `--pretty` output.
    #[config(env = "RESULTPOST_INDENT", default = 2)]
    pub indent: usize,

    /// When set, `send --url` is treated as an endpoint path and joined onto this base URL, e.g.
    /// `https://api.example.com`.
    #[config(env = "RESULTPOST_BASE_URL")]
    pub base_url: Option<String>,

    /// Headers added to every request, written as `Name: value`. Headers given on the command
    /// line take precedence.
    #[config(default = [])]
    pub headers: Vec<String>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let builder = Config::builder().env();
        let builder = match path {
            Some(path) => {
                if !path.exists() {
                    bail!("config file `{}` does not exist", path.display());
                }
                builder.file(path)
            }
            None => builder.file(DEFAULT_CONFIG_FILE),
        };
        builder.load().context("failed to load configuration")
    }
}
