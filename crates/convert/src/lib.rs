//! Skill, command and instructions conversion between agent dialects.
//!
//! Claude Code, OpenCode, GitHub Copilot and Cursor each store the same kinds
//! of agent-facing markdown (skills, commands, project instructions) and MCP
//! server wiring under different file names and front-matter schemas. This
//! crate parses any of them into a per-dialect adapter, converts through a
//! dialect-neutral canonical record, and reports every field the target
//! dialect cannot hold as a warning instead of dropping it silently.
//!
//! Everything here is pure: no I/O, no logging, no global state.
//!
//! # Example
//!
//! ```
//! use skillport_convert::{convert_with_info, parse_skill, Dialect};
//!
//! let skill = parse_skill(
//!     Dialect::Claude,
//!     "---\nname: pdf-helper\ndescription: Work with PDFs\nglobs:\n- '*.pdf'\n---\n\nUse pdftotext.\n",
//! )
//! .unwrap();
//!
//! let conversion = convert_with_info(&skill, Dialect::Copilot).unwrap();
//! assert_eq!(conversion.filename, "pdf-helper.agent.md");
//! assert!(conversion.content.contains("name: pdf-helper"));
//! assert_eq!(
//!     conversion.warnings,
//!     vec!["skill field 'globs' is not supported by Copilot and was dropped"]
//! );
//! ```

#![deny(unsafe_code)]

pub mod adapters;
pub mod convert;
pub mod detect;
pub mod dialect;
pub mod error;
pub mod frontmatter;
pub mod mcp;
pub mod model;
pub mod naming;

pub use adapters::{
    Artifact, ArtifactFormat, CanonicalForm, CommandArtifact, InstructionsArtifact, Shape,
    SkillArtifact,
};
pub use convert::{
    convert, convert_with_fallback_name, convert_with_info, lost_fields, supports_field, Conversion,
};
pub use detect::{
    classify_artifact_kind, detect, detect_artifact_kind, detect_dialect, detect_mcp_format,
    detect_mcp_format_from_content, is_mcp_config_path, name_from_path, parse_artifact_path,
    Detection, KindMatch,
};
pub use dialect::{ArtifactKind, Dialect};
pub use error::{Error, Result};
pub use mcp::{
    convert_mcp, convert_mcp_with_info, is_representable, mcp_output_path, merge_mcp_configs,
    parse_mcp_config, serialize_mcp_config, McpConfig, McpConversion, McpServer, McpTransport,
};
pub use model::{
    CanonicalArtifact, CanonicalCommand, CanonicalInstructions, CanonicalSkill, Field, Metadata,
};
pub use naming::{kebab_case, output_directory, output_filename};

/// Parses a skill file written in `dialect`.
pub fn parse_skill(dialect: Dialect, content: &str) -> Result<Artifact> {
    Artifact::parse(ArtifactKind::Skill, dialect, content)
}

/// Parses a command file written in `dialect`. Cursor commands are rules.
pub fn parse_command(dialect: Dialect, content: &str) -> Result<Artifact> {
    Artifact::parse(ArtifactKind::Command, dialect, content)
}

/// Parses a project instructions file written in `dialect`.
pub fn parse_instructions(dialect: Dialect, content: &str) -> Result<Artifact> {
    Artifact::parse(ArtifactKind::Instructions, dialect, content)
}

/// Parses `content` as an artifact of `kind` in `dialect`.
pub fn parse_artifact(kind: ArtifactKind, dialect: Dialect, content: &str) -> Result<Artifact> {
    Artifact::parse(kind, dialect, content)
}
