//! MCP config conversion with loss reporting.

use super::{mcp_output_path, serialize_mcp_config, McpConfig, McpServer, McpTransport};
use crate::dialect::Dialect;
use crate::error::Result;

/// Output of [`convert_mcp_with_info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpConversion {
    pub content: String,
    /// One entry per server field the target cannot hold.
    pub warnings: Vec<String>,
    /// Project-relative path the config belongs at in the target dialect.
    pub filename: String,
}

struct ServerFieldRule {
    key: &'static str,
    present: fn(&McpServer) -> bool,
    supported_by: &'static [Dialect],
}

const REMOTE_CAPABLE: &[Dialect] = &[Dialect::OpenCode, Dialect::Copilot];

static SERVER_FIELDS: &[ServerFieldRule] = &[
    ServerFieldRule {
        key: "type",
        present: |server| server.transport == McpTransport::Sse,
        supported_by: &[Dialect::Copilot],
    },
    ServerFieldRule {
        key: "url",
        present: |server| server.url.is_some(),
        supported_by: REMOTE_CAPABLE,
    },
    ServerFieldRule {
        key: "headers",
        present: |server| !server.headers.is_empty(),
        supported_by: REMOTE_CAPABLE,
    },
    ServerFieldRule {
        key: "enabled",
        present: |server| server.enabled.is_some(),
        supported_by: &[Dialect::OpenCode],
    },
    ServerFieldRule {
        key: "disabled",
        present: |server| server.disabled,
        supported_by: &[Dialect::Claude],
    },
    ServerFieldRule {
        key: "timeout",
        present: |server| server.timeout > 0,
        supported_by: &[Dialect::Claude],
    },
];

/// Keys set on `server` that `target` has no slot for, in table order.
pub fn lost_server_fields(server: &McpServer, target: Dialect) -> Vec<&'static str> {
    SERVER_FIELDS
        .iter()
        .filter(|rule| (rule.present)(server) && !rule.supported_by.contains(&target))
        .map(|rule| rule.key)
        .collect()
}

/// Renders `config` in `target`.
pub fn convert_mcp(config: &McpConfig, target: Dialect) -> Result<String> {
    serialize_mcp_config(config, target)
}

/// Whether `target` can write `server` at all. Claude and Cursor only
/// launch local commands, so a server without one has no entry there.
pub fn is_representable(server: &McpServer, target: Dialect) -> bool {
    server.command.is_some() || REMOTE_CAPABLE.contains(&target)
}

/// Renders `config` in `target` and lists every dropped server field,
/// servers in name order. A server `target` cannot represent is omitted
/// and reported once instead of field by field.
pub fn convert_mcp_with_info(config: &McpConfig, target: Dialect) -> Result<McpConversion> {
    let mut warnings = Vec::new();
    for server in config.servers.values() {
        if !is_representable(server, target) {
            warnings.push(format!(
                "MCP server '{}' has no command and was omitted: {} supports only local servers",
                server.name,
                target.display_name()
            ));
            continue;
        }
        for key in lost_server_fields(server, target) {
            warnings.push(format!(
                "MCP server '{}': field '{}' is not supported by {} and was dropped",
                server.name,
                key,
                target.display_name()
            ));
        }
    }

    Ok(McpConversion {
        content: convert_mcp(config, target)?,
        warnings,
        filename: mcp_output_path(target).to_string(),
    })
}
