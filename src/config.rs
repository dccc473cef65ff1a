// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line and environment configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::figma::{FigmaAuth, DEFAULT_BASE_URL};
use crate::mcp::ServerSettings;
use crate::model::NodeId;
use crate::output::OutputFormat;
use crate::simplify::{GeometryMode, SimplifyOptions};

pub const DEFAULT_PORT: u16 = 3333;

#[derive(Debug, Clone, Parser)]
#[command(name = "figlens", version)]
#[command(about = "Serve Figma designs to coding agents as compact, deduplicated design data")]
pub struct Cli {
    /// Figma personal access token.
    #[arg(long, env = "FIGMA_API_KEY", hide_env_values = true)]
    pub figma_api_key: Option<String>,

    /// Figma OAuth access token; takes precedence over the personal access token.
    #[arg(long, env = "FIGMA_OAUTH_TOKEN", hide_env_values = true)]
    pub figma_oauth_token: Option<String>,

    /// Port of the streamable HTTP endpoint (`http://127.0.0.1:<port>/mcp`).
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Serve MCP over stdin/stdout instead of HTTP.
    #[arg(long)]
    pub stdio: bool,

    /// Emit JSON instead of YAML.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit canvas coordinates instead of coordinates relative to the parent.
    #[arg(long, global = true)]
    pub absolute: bool,

    /// Seconds a single simplification may run before the request fails.
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub simplify_timeout_secs: u64,

    #[arg(long, env = "FIGMA_API_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub figma_base_url: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Simplify raw Figma JSON dumps (file or file-nodes responses) without calling the API.
    Simplify(SimplifyArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SimplifyArgs {
    /// Raw JSON files to convert.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write `<name>.simplified.<ext>` files here instead of printing to stdout.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Deepest level to emit; output roots are level 0.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only emit this node's subtree (`1:2` or `1-2`).
    #[arg(long, value_parser = parse_node_id)]
    pub node_id: Option<NodeId>,
}

fn parse_node_id(raw: &str) -> Result<NodeId, String> {
    NodeId::new(raw).map_err(|err| err.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingCredentials,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => f.write_str(
                "no figma credentials: set FIGMA_API_KEY or FIGMA_OAUTH_TOKEN \
                 (or pass --figma-api-key / --figma-oauth-token)",
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Cli {
    pub fn auth(&self) -> Result<FigmaAuth, ConfigError> {
        let present = |value: &Option<String>| {
            value.as_deref().map(str::trim).filter(|value| !value.is_empty()).map(str::to_owned)
        };
        if let Some(token) = present(&self.figma_oauth_token) {
            return Ok(FigmaAuth::OAuth(token));
        }
        present(&self.figma_api_key).map(FigmaAuth::ApiKey).ok_or(ConfigError::MissingCredentials)
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Yaml
        }
    }

    pub fn geometry(&self) -> GeometryMode {
        if self.absolute {
            GeometryMode::Absolute
        } else {
            GeometryMode::Relative
        }
    }

    pub fn server_settings(&self, download_root: PathBuf) -> ServerSettings {
        ServerSettings {
            format: self.output_format(),
            geometry: self.geometry(),
            simplify_timeout: Duration::from_secs(self.simplify_timeout_secs),
            download_root,
        }
    }
}

impl SimplifyArgs {
    pub fn options(&self, geometry: GeometryMode) -> SimplifyOptions {
        SimplifyOptions {
            max_depth: self.max_depth,
            target_node_id: self.node_id.clone(),
            geometry,
        }
    }
}
