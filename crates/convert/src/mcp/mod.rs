//! MCP server configuration.
//!
//! MCP configs are JSON objects keyed by server name, not front matter plus a
//! body, so they get their own canonical record and pipeline. Each dialect
//! nests the servers under a different root key and spells the entries
//! differently; see [`wire`] for the per-dialect shapes.

mod convert;
mod wire;

pub use convert::{
    convert_mcp, convert_mcp_with_info, is_representable, lost_server_fields, McpConversion,
};

use crate::dialect::Dialect;
use crate::error::Result;
use std::collections::BTreeMap;

/// How the agent reaches the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum McpTransport {
    /// Spawned locally and spoken to over stdin/stdout.
    #[default]
    Stdio,
    /// Remote, streamable HTTP.
    Http,
    /// Remote, server-sent events.
    Sse,
}

impl McpTransport {
    pub fn is_remote(&self) -> bool {
        !matches!(self, McpTransport::Stdio)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            McpTransport::Stdio => "stdio",
            McpTransport::Http => "http",
            McpTransport::Sse => "sse",
        }
    }
}

/// A dialect-neutral MCP server entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McpServer {
    /// The key the server is stored under; never written inside the entry.
    pub name: String,
    pub command: Option<String>,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub transport: McpTransport,
    /// Endpoint of a remote server.
    pub url: Option<String>,
    pub headers: BTreeMap<String, String>,
    /// OpenCode's explicit on/off switch.
    pub enabled: Option<bool>,
    /// Claude's `disabled` flag.
    pub disabled: bool,
    /// Claude's startup timeout in milliseconds, 0 when unset.
    pub timeout: u64,
}

impl McpServer {
    /// A local server launched with `command` and `args`.
    pub fn stdio(name: impl Into<String>, command: impl Into<String>, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            command: Some(command.into()),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            ..Default::default()
        }
    }
}

/// A set of MCP servers plus the dialect they were read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McpConfig {
    pub servers: BTreeMap<String, McpServer>,
    /// Provenance only; conversion never depends on it for correctness.
    pub source_dialect: Option<Dialect>,
}

impl McpConfig {
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Inserts `server` under its own name, replacing any previous entry.
    pub fn insert(&mut self, server: McpServer) {
        self.servers.insert(server.name.clone(), server);
    }
}

/// JSON key the server map lives under.
pub fn mcp_root_key(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Claude | Dialect::Cursor => "mcpServers",
        Dialect::OpenCode => "mcp",
        Dialect::Copilot => "servers",
    }
}

/// Project-relative file an MCP config is written to.
pub fn mcp_output_path(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Claude => ".mcp.json",
        Dialect::OpenCode => "opencode.json",
        Dialect::Copilot => ".vscode/mcp.json",
        Dialect::Cursor => ".cursor/mcp.json",
    }
}

/// Parses an MCP config written in `dialect`.
///
/// Malformed JSON is an error. A document that is not an object, or has no
/// server map under the dialect's root key, is an empty config. Entries that
/// are not objects are skipped.
pub fn parse_mcp_config(content: &str, dialect: Dialect) -> Result<McpConfig> {
    let root: serde_json::Value = serde_json::from_str(content)?;
    let mut config = McpConfig {
        servers: BTreeMap::new(),
        source_dialect: Some(dialect),
    };

    let Some(entries) = root
        .get(mcp_root_key(dialect))
        .and_then(serde_json::Value::as_object)
    else {
        return Ok(config);
    };

    for (name, entry) in entries {
        let Some(entry) = entry.as_object() else {
            continue;
        };
        config.insert(wire::read_server(dialect, name, entry));
    }
    Ok(config)
}

/// Serializes `config` in `dialect` as pretty JSON with a trailing newline.
///
/// Fields the dialect has no slot for are left out; use
/// [`convert_mcp_with_info`] to find out which.
pub fn serialize_mcp_config(config: &McpConfig, dialect: Dialect) -> Result<String> {
    let mut out = wire::write_config(dialect, config)?;
    out.push('\n');
    Ok(out)
}

/// Folds `configs` left to right. Later servers replace earlier ones with the
/// same name, and the last known source dialect wins.
pub fn merge_mcp_configs(configs: impl IntoIterator<Item = McpConfig>) -> McpConfig {
    configs
        .into_iter()
        .fold(McpConfig::default(), |mut merged, config| {
            merged.servers.extend(config.servers);
            if config.source_dialect.is_some() {
                merged.source_dialect = config.source_dialect;
            }
            merged
        })
}
