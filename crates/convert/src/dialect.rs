//! The closed set of dialects and artifact kinds.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// One agent ecosystem's on-disk convention for artifacts and MCP configs.
///
/// Adding a variant means adding a branch at every `match` on this type;
/// the compiler lists each site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    /// Claude Code (`.claude/`, `SKILL.md`, `CLAUDE.md`, `.mcp.json`).
    Claude,
    /// OpenCode. Skills and commands are byte-identical to Claude's.
    OpenCode,
    /// GitHub Copilot (`*.agent.md`, `*.prompt.md`, `*.instructions.md`).
    Copilot,
    /// Cursor (`.cursor/rules/*.mdc`, `.cursorrules`). Has no command concept.
    Cursor,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::Claude,
        Dialect::OpenCode,
        Dialect::Copilot,
        Dialect::Cursor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Claude => "claude",
            Dialect::OpenCode => "opencode",
            Dialect::Copilot => "copilot",
            Dialect::Cursor => "cursor",
        }
    }

    /// Human-facing product name used in warning text.
    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::Claude => "Claude",
            Dialect::OpenCode => "OpenCode",
            Dialect::Copilot => "Copilot",
            Dialect::Cursor => "Cursor",
        }
    }

    /// Whether this dialect has a slash-command/prompt concept.
    pub fn has_commands(&self) -> bool {
        !matches!(self, Dialect::Cursor)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" | "claude-code" => Ok(Dialect::Claude),
            "opencode" | "open-code" => Ok(Dialect::OpenCode),
            "copilot" | "github-copilot" | "vscode" => Ok(Dialect::Copilot),
            "cursor" => Ok(Dialect::Cursor),
            _ => Err(Error::UnsupportedDialect(s.to_string())),
        }
    }
}

/// The three artifact kinds. MCP configs are modeled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Skill,
    Command,
    Instructions,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Skill,
        ArtifactKind::Command,
        ArtifactKind::Instructions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Skill => "skill",
            ArtifactKind::Command => "command",
            ArtifactKind::Instructions => "instructions",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("claude".parse::<Dialect>().unwrap(), Dialect::Claude);
        assert_eq!("Claude-Code".parse::<Dialect>().unwrap(), Dialect::Claude);
        assert_eq!("opencode".parse::<Dialect>().unwrap(), Dialect::OpenCode);
        assert_eq!(
            "github-copilot".parse::<Dialect>().unwrap(),
            Dialect::Copilot
        );
        assert_eq!(" cursor ".parse::<Dialect>().unwrap(), Dialect::Cursor);
    }

    #[test]
    fn unknown_dialect_is_an_error() {
        let err = "windsurf".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedDialect(ref name) if name == "windsurf"));
        assert!(err.to_string().contains("windsurf"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn only_cursor_lacks_commands() {
        let without: Vec<_> = Dialect::ALL
            .into_iter()
            .filter(|d| !d.has_commands())
            .collect();
        assert_eq!(without, vec![Dialect::Cursor]);
    }
}
