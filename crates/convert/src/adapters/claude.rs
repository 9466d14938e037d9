//! Claude-style artifacts, shared byte-for-byte with OpenCode.
//!
//! - Skills: `SKILL.md` inside a per-skill directory
//! - Commands: `<name>.md` inside the commands directory
//! - Instructions: `CLAUDE.md` (OpenCode: `AGENTS.md`), usually plain markdown

use super::traits::{ArtifactFormat, CanonicalForm, Extra};
use crate::error::Result;
use crate::frontmatter::{de, parse_frontmatter, render_frontmatter, render_optional_frontmatter};
use crate::model::{CanonicalCommand, CanonicalInstructions, CanonicalSkill, Metadata};
use serde::{Deserialize, Serialize};

/// Front matter of a Claude `SKILL.md`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaudeSkillFrontmatter {
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "de::string_list", skip_serializing_if = "Vec::is_empty")]
    pub globs: Vec<String>,
    #[serde(default, deserialize_with = "de::string_list", skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(
        default,
        rename = "allowed-tools",
        deserialize_with = "de::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_tools: Vec<String>,
    /// Keys this dialect does not define, kept for same-shape conversions.
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaudeSkill {
    pub front_matter: ClaudeSkillFrontmatter,
    pub body: String,
}

impl ArtifactFormat for ClaudeSkill {
    fn parse(content: &str) -> Result<Self> {
        let parsed = parse_frontmatter::<ClaudeSkillFrontmatter>(content)?;
        Ok(Self {
            front_matter: parsed.front_matter,
            body: parsed.body,
        })
    }

    fn name(&self) -> String {
        self.front_matter.name.clone()
    }

    fn description(&self) -> &str {
        &self.front_matter.description
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn serialize(&self) -> Result<String> {
        render_frontmatter(&self.front_matter, &self.body)
    }

    fn extra(&self) -> &Extra {
        &self.front_matter.extra
    }

    fn extra_mut(&mut self) -> &mut Extra {
        &mut self.front_matter.extra
    }

    fn clear_name(&mut self) {
        self.front_matter.name.clear();
    }
}

impl CanonicalForm<CanonicalSkill> for ClaudeSkill {
    fn to_canonical(&self) -> CanonicalSkill {
        let fm = &self.front_matter;
        CanonicalSkill {
            meta: Metadata {
                name: fm.name.clone(),
                description: fm.description.clone(),
                version: fm.version.clone(),
                author: fm.author.clone(),
                body: self.body.clone(),
            },
            globs: fm.globs.clone(),
            includes: fm.includes.clone(),
            allowed_tools: fm.allowed_tools.clone(),
        }
    }

    fn from_canonical(skill: &CanonicalSkill) -> Self {
        Self {
            front_matter: ClaudeSkillFrontmatter {
                name: skill.meta.name.clone(),
                description: skill.meta.description.clone(),
                version: skill.meta.version.clone(),
                author: skill.meta.author.clone(),
                globs: skill.globs.clone(),
                includes: skill.includes.clone(),
                allowed_tools: skill.allowed_tools.clone(),
                extra: Extra::new(),
            },
            body: skill.meta.body.clone(),
        }
    }
}

/// Front matter of a Claude slash command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaudeCommandFrontmatter {
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        default,
        rename = "allowed-tools",
        deserialize_with = "de::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_tools: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaudeCommand {
    pub front_matter: ClaudeCommandFrontmatter,
    pub body: String,
}

impl ArtifactFormat for ClaudeCommand {
    fn parse(content: &str) -> Result<Self> {
        let parsed = parse_frontmatter::<ClaudeCommandFrontmatter>(content)?;
        Ok(Self {
            front_matter: parsed.front_matter,
            body: parsed.body,
        })
    }

    fn name(&self) -> String {
        self.front_matter.name.clone()
    }

    fn description(&self) -> &str {
        &self.front_matter.description
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn serialize(&self) -> Result<String> {
        render_frontmatter(&self.front_matter, &self.body)
    }

    fn extra(&self) -> &Extra {
        &self.front_matter.extra
    }

    fn extra_mut(&mut self) -> &mut Extra {
        &mut self.front_matter.extra
    }

    fn clear_name(&mut self) {
        self.front_matter.name.clear();
    }
}

impl CanonicalForm<CanonicalCommand> for ClaudeCommand {
    fn to_canonical(&self) -> CanonicalCommand {
        let fm = &self.front_matter;
        CanonicalCommand {
            meta: Metadata {
                name: fm.name.clone(),
                description: fm.description.clone(),
                version: fm.version.clone(),
                author: fm.author.clone(),
                body: self.body.clone(),
            },
            allowed_tools: fm.allowed_tools.clone(),
        }
    }

    fn from_canonical(command: &CanonicalCommand) -> Self {
        Self {
            front_matter: ClaudeCommandFrontmatter {
                name: command.meta.name.clone(),
                description: command.meta.description.clone(),
                version: command.meta.version.clone(),
                author: command.meta.author.clone(),
                allowed_tools: command.allowed_tools.clone(),
                extra: Extra::new(),
            },
            body: command.meta.body.clone(),
        }
    }
}

/// Optional front matter of `CLAUDE.md` / `AGENTS.md`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaudeInstructionsFrontmatter {
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Project instructions. Written as plain markdown unless it has a name or
/// description to record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaudeInstructions {
    pub front_matter: ClaudeInstructionsFrontmatter,
    pub body: String,
}

impl ArtifactFormat for ClaudeInstructions {
    fn parse(content: &str) -> Result<Self> {
        let parsed = parse_frontmatter::<ClaudeInstructionsFrontmatter>(content)?;
        Ok(Self {
            front_matter: parsed.front_matter,
            body: parsed.body,
        })
    }

    fn name(&self) -> String {
        self.front_matter.name.clone()
    }

    fn description(&self) -> &str {
        &self.front_matter.description
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn serialize(&self) -> Result<String> {
        render_optional_frontmatter(&self.front_matter, &self.body)
    }

    fn extra(&self) -> &Extra {
        &self.front_matter.extra
    }

    fn extra_mut(&mut self) -> &mut Extra {
        &mut self.front_matter.extra
    }

    fn clear_name(&mut self) {
        self.front_matter.name.clear();
    }
}

impl CanonicalForm<CanonicalInstructions> for ClaudeInstructions {
    fn to_canonical(&self) -> CanonicalInstructions {
        CanonicalInstructions {
            meta: Metadata {
                name: self.front_matter.name.clone(),
                description: self.front_matter.description.clone(),
                version: None,
                author: None,
                body: self.body.clone(),
            },
            ..Default::default()
        }
    }

    fn from_canonical(instructions: &CanonicalInstructions) -> Self {
        Self {
            front_matter: ClaudeInstructionsFrontmatter {
                name: instructions.meta.name.clone(),
                description: instructions.meta.description.clone(),
                extra: Extra::new(),
            },
            body: instructions.meta.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKILL: &str = "---
name: pdf-helper
description: Extracts text from PDFs
version: 1.2.0
globs:
- '*.pdf'
allowed-tools:
- Read
- Bash
---

# PDF Helper

Use `pdftotext`.
";

    #[test]
    fn parses_skill_front_matter() {
        let skill = ClaudeSkill::parse(SKILL).unwrap();
        assert_eq!(skill.name(), "pdf-helper");
        assert_eq!(skill.description(), "Extracts text from PDFs");
        assert_eq!(skill.front_matter.version.as_deref(), Some("1.2.0"));
        assert_eq!(skill.front_matter.globs, vec!["*.pdf"]);
        assert_eq!(skill.front_matter.allowed_tools, vec!["Read", "Bash"]);
        assert!(skill.body.starts_with("# PDF Helper"));
    }

    #[test]
    fn skill_serializes_back_to_same_text() {
        let skill = ClaudeSkill::parse(SKILL).unwrap();
        assert_eq!(skill.serialize().unwrap(), SKILL);
    }

    #[test]
    fn unknown_keys_are_kept_in_extra() {
        let skill =
            ClaudeSkill::parse("---\nname: a\nlicense: MIT\nmodel: opus\n---\nBody").unwrap();
        let keys: Vec<_> = skill.extra().keys().cloned().collect();
        assert_eq!(keys, vec!["license", "model"]);
        let text = skill.serialize().unwrap();
        assert!(text.contains("license: MIT"));
        assert!(text.contains("model: opus"));
    }

    #[test]
    fn command_accepts_comma_separated_tools() {
        let command = ClaudeCommand::parse(
            "---\ndescription: Commit staged work\nallowed-tools: Bash, Read\n---\nCommit.",
        )
        .unwrap();
        assert_eq!(command.name(), "");
        assert_eq!(command.front_matter.allowed_tools, vec!["Bash", "Read"]);
        let canonical = command.to_canonical();
        assert_eq!(canonical.allowed_tools, vec!["Bash", "Read"]);
        assert_eq!(canonical.meta.body, "Commit.");
    }

    #[test]
    fn instructions_without_metadata_stay_plain() {
        let content = "# Project\n\nUse tabs.\n";
        let instructions = ClaudeInstructions::parse(content).unwrap();
        assert_eq!(instructions.serialize().unwrap(), content);
    }

    #[test]
    fn instructions_with_name_get_front_matter() {
        let instructions = ClaudeInstructions::from_canonical(&CanonicalInstructions {
            meta: Metadata {
                name: "team-rules".into(),
                body: "Be kind.\n".into(),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(
            instructions.serialize().unwrap(),
            "---\nname: team-rules\n---\n\nBe kind.\n"
        );
    }
}
