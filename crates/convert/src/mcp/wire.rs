//! Per-dialect MCP JSON shapes.
//!
//! Reading is lenient and goes through `serde_json::Value`: values of the
//! wrong type are ignored rather than failing the whole file, and scalar
//! env/header values are stringified. Writing goes through one typed struct
//! per dialect so key order is fixed and empty fields are omitted. Claude and
//! Cursor entries are only written for servers with a command.
//!
//! ```text
//! Claude   {"mcpServers": {"n": {"command", "args", "env", "disabled", "timeout"}}}
//! Cursor   {"mcpServers": {"n": {"command", "args", "env"}}}
//! OpenCode {"mcp": {"n": {"type": "local"|"remote", "command": [exe, ..args],
//!                         "environment", "url", "headers", "enabled"}}}
//! Copilot  {"servers": {"n": {"type": "stdio"|"http"|"sse", "command", "args",
//!                             "env", "url", "headers"}}}
//! ```

use super::{is_representable, mcp_root_key, McpConfig, McpServer, McpTransport};
use crate::dialect::Dialect;
use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_field(entry: &Map<String, Value>, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(key, value)| scalar(value).map(|value| (key.clone(), value)))
                .collect()
        })
        .unwrap_or_default()
}

/// Transport from an explicit `type`, else from whether a `url` is present.
fn transport(kind: Option<&str>, url: &Option<String>) -> McpTransport {
    match kind {
        Some("stdio" | "local") => McpTransport::Stdio,
        Some("sse") => McpTransport::Sse,
        Some("http" | "remote" | "streamable-http") => McpTransport::Http,
        _ if url.is_some() => McpTransport::Http,
        _ => McpTransport::Stdio,
    }
}

/// Reads one server entry written in `dialect`.
pub(super) fn read_server(dialect: Dialect, name: &str, entry: &Map<String, Value>) -> McpServer {
    let mut server = McpServer {
        name: name.to_string(),
        ..Default::default()
    };

    match dialect {
        Dialect::Claude | Dialect::Cursor => {
            server.command = string_field(entry, "command");
            server.args = string_list(entry.get("args"));
            server.env = string_map(entry.get("env"));
            if dialect == Dialect::Claude {
                server.disabled = entry
                    .get("disabled")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                server.timeout = entry.get("timeout").and_then(Value::as_u64).unwrap_or(0);
            }
        }
        Dialect::OpenCode => {
            let mut command = string_list(entry.get("command")).into_iter();
            server.command = command.next().filter(|exe| !exe.is_empty());
            server.args = command.collect();
            server.env = string_map(entry.get("environment"));
            server.url = string_field(entry, "url");
            server.headers = string_map(entry.get("headers"));
            server.enabled = entry.get("enabled").and_then(Value::as_bool);
            server.transport = transport(entry.get("type").and_then(Value::as_str), &server.url);
        }
        Dialect::Copilot => {
            server.command = string_field(entry, "command");
            server.args = string_list(entry.get("args"));
            server.env = string_map(entry.get("env"));
            server.url = string_field(entry, "url");
            server.headers = string_map(entry.get("headers"));
            server.transport = transport(entry.get("type").and_then(Value::as_str), &server.url);
        }
    }
    server
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[derive(Serialize)]
struct ClaudeEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    args: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "is_false")]
    disabled: bool,
    #[serde(skip_serializing_if = "is_zero")]
    timeout: u64,
}

#[derive(Serialize)]
struct CursorEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    args: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct OpenCodeEntry<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    command: Vec<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
}

#[derive(Serialize)]
struct CopilotEntry<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    args: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, String>,
}

fn claude_entry(server: &McpServer) -> ClaudeEntry<'_> {
    ClaudeEntry {
        command: server.command.as_deref(),
        args: server.args.clone(),
        env: server.env.clone(),
        disabled: server.disabled,
        timeout: server.timeout,
    }
}

fn cursor_entry(server: &McpServer) -> CursorEntry<'_> {
    CursorEntry {
        command: server.command.as_deref(),
        args: server.args.clone(),
        env: server.env.clone(),
    }
}

/// OpenCode joins the executable and its arguments into one array.
fn opencode_entry(server: &McpServer) -> OpenCodeEntry<'_> {
    let command = server
        .command
        .as_deref()
        .into_iter()
        .chain(server.args.iter().map(String::as_str))
        .collect();
    OpenCodeEntry {
        kind: if server.transport.is_remote() {
            "remote"
        } else {
            "local"
        },
        command,
        environment: server.env.clone(),
        url: server.url.as_deref(),
        headers: server.headers.clone(),
        enabled: server.enabled,
    }
}

fn copilot_entry(server: &McpServer) -> CopilotEntry<'_> {
    CopilotEntry {
        kind: server.transport.as_str(),
        command: server.command.as_deref(),
        args: server.args.clone(),
        env: server.env.clone(),
        url: server.url.as_deref(),
        headers: server.headers.clone(),
    }
}

fn wrap<T: Serialize>(dialect: Dialect, servers: BTreeMap<&str, T>) -> Result<String> {
    let mut root = BTreeMap::new();
    root.insert(mcp_root_key(dialect), servers);
    Ok(serde_json::to_string_pretty(&root)?)
}

/// Renders `config` in `dialect` as pretty JSON without a trailing newline.
pub(super) fn write_config(dialect: Dialect, config: &McpConfig) -> Result<String> {
    let servers = config
        .servers
        .iter()
        .filter(|(_, server)| is_representable(server, dialect))
        .map(|(name, server)| (name.as_str(), server));
    match dialect {
        Dialect::Claude => wrap(dialect, servers.map(|(n, s)| (n, claude_entry(s))).collect()),
        Dialect::Cursor => wrap(dialect, servers.map(|(n, s)| (n, cursor_entry(s))).collect()),
        Dialect::OpenCode => wrap(dialect, servers.map(|(n, s)| (n, opencode_entry(s))).collect()),
        Dialect::Copilot => wrap(dialect, servers.map(|(n, s)| (n, copilot_entry(s))).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read(dialect: Dialect, value: Value) -> McpServer {
        read_server(dialect, "srv", value.as_object().unwrap())
    }

    #[test]
    fn opencode_command_array_is_split() {
        let server = read(
            Dialect::OpenCode,
            json!({"type": "local", "command": ["npx", "-y", "pkg"], "environment": {"K": "v"}}),
        );
        assert_eq!(server.command.as_deref(), Some("npx"));
        assert_eq!(server.args, vec!["-y", "pkg"]);
        assert_eq!(server.env["K"], "v");
        assert_eq!(server.transport, McpTransport::Stdio);
    }

    #[test]
    fn opencode_remote_entry() {
        let server = read(
            Dialect::OpenCode,
            json!({"type": "remote", "url": "https://mcp.example.com", "headers": {"Authorization": "Bearer t"}, "enabled": false}),
        );
        assert!(server.command.is_none());
        assert_eq!(server.transport, McpTransport::Http);
        assert_eq!(server.url.as_deref(), Some("https://mcp.example.com"));
        assert_eq!(server.enabled, Some(false));
    }

    #[test]
    fn copilot_type_defaults_from_url() {
        let remote = read(Dialect::Copilot, json!({"url": "https://x"}));
        assert_eq!(remote.transport, McpTransport::Http);
        let sse = read(Dialect::Copilot, json!({"type": "sse", "url": "https://x"}));
        assert_eq!(sse.transport, McpTransport::Sse);
        let local = read(Dialect::Copilot, json!({"command": "node"}));
        assert_eq!(local.transport, McpTransport::Stdio);
    }

    #[test]
    fn claude_reads_disabled_and_timeout_but_cursor_does_not() {
        let value = json!({"command": "x", "disabled": true, "timeout": 5000});
        let claude = read(Dialect::Claude, value.clone());
        assert!(claude.disabled);
        assert_eq!(claude.timeout, 5000);

        let cursor = read(Dialect::Cursor, value);
        assert!(!cursor.disabled);
        assert_eq!(cursor.timeout, 0);
    }

    #[test]
    fn wrong_types_are_ignored_and_scalars_stringified() {
        let server = read(
            Dialect::Claude,
            json!({"command": "x", "args": "not-a-list", "env": {"PORT": 8080, "DEBUG": true, "NESTED": {}}}),
        );
        assert!(server.args.is_empty());
        assert_eq!(server.env["PORT"], "8080");
        assert_eq!(server.env["DEBUG"], "true");
        assert!(!server.env.contains_key("NESTED"));
    }

    #[test]
    fn opencode_output_joins_command() {
        let mut config = McpConfig::default();
        config.insert(McpServer::stdio("fs", "npx", &["-y", "pkg"]));
        let out = write_config(Dialect::OpenCode, &config).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({"mcp": {"fs": {"type": "local", "command": ["npx", "-y", "pkg"]}}})
        );
    }

    #[test]
    fn copilot_output_always_has_type() {
        let mut config = McpConfig::default();
        config.insert(McpServer::stdio("fs", "npx", &[]));
        let out = write_config(Dialect::Copilot, &config).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({"servers": {"fs": {"type": "stdio", "command": "npx"}}})
        );
    }
}
