//! Cursor rules.
//!
//! Cursor models everything as a rule: an `.mdc` file whose front matter
//! carries `description`, a comma-joined `globs` string and `alwaysApply`.
//! A rule with nothing to record is written as bare markdown. Project
//! instructions may also come from a legacy `.cursorrules` plain-text file;
//! which shape an input is gets decided when it is parsed.

use super::traits::{ArtifactFormat, CanonicalForm, Extra};
use crate::error::Result;
use crate::frontmatter::{de, has_frontmatter, parse_frontmatter, render_optional_frontmatter};
use crate::model::{CanonicalCommand, CanonicalInstructions, CanonicalSkill, Metadata};
use crate::naming::{description_name, heading_name};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorRuleFrontmatter {
    /// Cursor itself ignores this key; it is written so names survive a
    /// round trip through Cursor.
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "de::glob_string", skip_serializing_if = "Option::is_none")]
    pub globs: Option<String>,
    #[serde(default, rename = "alwaysApply", skip_serializing_if = "is_false")]
    pub always_apply: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl CursorRuleFrontmatter {
    /// Explicit name, else the first `# ` heading, else a name cut from the
    /// description.
    fn resolved_name(&self, body: &str) -> String {
        self.name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| heading_name(body))
            .or_else(|| description_name(&self.description))
            .unwrap_or_default()
    }
}

fn non_empty(name: &str) -> Option<String> {
    Some(name.to_string()).filter(|name| !name.is_empty())
}

fn split_globs(globs: &Option<String>) -> Vec<String> {
    globs
        .as_deref()
        .map(de::split_list)
        .unwrap_or_default()
}

fn join_globs(globs: &[String]) -> Option<String> {
    if globs.is_empty() {
        None
    } else {
        Some(globs.join(","))
    }
}

/// A `.cursor/rules/*.mdc` rule. Used for skills and, lacking anything
/// better, for commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CursorRule {
    pub front_matter: CursorRuleFrontmatter,
    pub body: String,
}

impl ArtifactFormat for CursorRule {
    fn parse(content: &str) -> Result<Self> {
        let parsed = parse_frontmatter::<CursorRuleFrontmatter>(content)?;
        Ok(Self {
            front_matter: parsed.front_matter,
            body: parsed.body,
        })
    }

    fn name(&self) -> String {
        self.front_matter.resolved_name(&self.body)
    }

    fn has_explicit_name(&self) -> bool {
        self.front_matter.name.as_deref().is_some_and(|name| !name.is_empty())
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
        self.front_matter.name = None;
    }
}

impl CanonicalForm<CanonicalSkill> for CursorRule {
    fn to_canonical(&self) -> CanonicalSkill {
        CanonicalSkill {
            meta: Metadata {
                name: self.name(),
                description: self.front_matter.description.clone(),
                version: None,
                author: None,
                body: self.body.clone(),
            },
            globs: split_globs(&self.front_matter.globs),
            ..Default::default()
        }
    }

    fn from_canonical(skill: &CanonicalSkill) -> Self {
        Self {
            front_matter: CursorRuleFrontmatter {
                name: non_empty(&skill.meta.name),
                description: skill.meta.description.clone(),
                globs: join_globs(&skill.globs),
                always_apply: false,
                extra: Extra::new(),
            },
            body: skill.meta.body.clone(),
        }
    }
}

impl CanonicalForm<CanonicalCommand> for CursorRule {
    fn to_canonical(&self) -> CanonicalCommand {
        CanonicalCommand {
            meta: Metadata {
                name: self.name(),
                description: self.front_matter.description.clone(),
                version: None,
                author: None,
                body: self.body.clone(),
            },
            allowed_tools: Vec::new(),
        }
    }

    fn from_canonical(command: &CanonicalCommand) -> Self {
        Self {
            front_matter: CursorRuleFrontmatter {
                name: non_empty(&command.meta.name),
                description: command.meta.description.clone(),
                ..Default::default()
            },
            body: command.meta.body.clone(),
        }
    }
}

/// Cursor project instructions: an MDC rule or a legacy `.cursorrules` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CursorInstructions {
    pub front_matter: CursorRuleFrontmatter,
    pub body: String,
    /// Plain-text `.cursorrules` input; serialized back as plain text.
    pub legacy: bool,
}

impl ArtifactFormat for CursorInstructions {
    fn parse(content: &str) -> Result<Self> {
        if !has_frontmatter(content) {
            return Ok(Self {
                front_matter: CursorRuleFrontmatter::default(),
                body: content.to_string(),
                legacy: true,
            });
        }
        let parsed = parse_frontmatter::<CursorRuleFrontmatter>(content)?;
        Ok(Self {
            front_matter: parsed.front_matter,
            body: parsed.body,
            legacy: false,
        })
    }

    fn name(&self) -> String {
        self.front_matter.resolved_name(&self.body)
    }

    fn has_explicit_name(&self) -> bool {
        self.front_matter.name.as_deref().is_some_and(|name| !name.is_empty())
    }

    fn description(&self) -> &str {
        &self.front_matter.description
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn serialize(&self) -> Result<String> {
        if self.legacy {
            return Ok(self.body.clone());
        }
        render_optional_frontmatter(&self.front_matter, &self.body)
    }

    fn extra(&self) -> &Extra {
        &self.front_matter.extra
    }

    fn extra_mut(&mut self) -> &mut Extra {
        &mut self.front_matter.extra
    }

    fn clear_name(&mut self) {
        self.front_matter.name = None;
    }
}

impl CanonicalForm<CanonicalInstructions> for CursorInstructions {
    fn to_canonical(&self) -> CanonicalInstructions {
        CanonicalInstructions {
            meta: Metadata {
                name: self.name(),
                description: self.front_matter.description.clone(),
                version: None,
                author: None,
                body: self.body.clone(),
            },
            apply_to: None,
            globs: self.front_matter.globs.clone(),
            always_apply: self.front_matter.always_apply,
        }
    }

    fn from_canonical(instructions: &CanonicalInstructions) -> Self {
        Self {
            front_matter: CursorRuleFrontmatter {
                name: non_empty(&instructions.meta.name),
                description: instructions.meta.description.clone(),
                globs: instructions.globs.clone().filter(|g| !g.is_empty()),
                always_apply: instructions.always_apply,
                extra: Extra::new(),
            },
            body: instructions.meta.body.clone(),
            legacy: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_without_front_matter_is_plain_body() {
        let content = "# Testing\n\nAlways run the suite.\n";
        let rule = CursorRule::parse(content).unwrap();
        assert_eq!(rule.name(), "Testing");
        assert_eq!(rule.serialize().unwrap(), content);
    }

    #[test]
    fn rule_name_falls_back_to_description() {
        let rule = CursorRule::parse("---\ndescription: Review Rust code\n---\nNo heading here.")
            .unwrap();
        assert_eq!(rule.name(), "review-rust-code");
    }

    #[test]
    fn rule_globs_accept_string_or_list() {
        let from_string = CursorRule::parse("---\nglobs: '*.ts, *.tsx'\n---\nx").unwrap();
        let from_list = CursorRule::parse("---\nglobs:\n- '*.ts'\n- '*.tsx'\n---\nx").unwrap();
        assert_eq!(from_string.front_matter.globs.as_deref(), Some("*.ts,*.tsx"));
        assert_eq!(from_list.front_matter.globs, from_string.front_matter.globs);

        let skill: CanonicalSkill = from_list.to_canonical();
        assert_eq!(skill.globs, vec!["*.ts", "*.tsx"]);
    }

    #[test]
    fn rule_from_skill_joins_globs() {
        let rule = CursorRule::from_canonical(&CanonicalSkill {
            meta: Metadata {
                name: "pdf-helper".into(),
                description: "PDF tools".into(),
                body: "Body\n".into(),
                ..Default::default()
            },
            globs: vec!["*.pdf".into(), "docs/**".into()],
            includes: vec!["README.md".into()],
            allowed_tools: vec!["Read".into()],
        });
        assert_eq!(
            rule.serialize().unwrap(),
            "---\nname: pdf-helper\ndescription: PDF tools\nglobs: '*.pdf,docs/**'\n---\n\nBody\n"
        );
    }

    #[test]
    fn legacy_instructions_are_detected_by_probe() {
        let legacy = CursorInstructions::parse("Prefer small functions.\n").unwrap();
        assert!(legacy.legacy);
        assert_eq!(legacy.serialize().unwrap(), "Prefer small functions.\n");

        let mdc = CursorInstructions::parse("---\nalwaysApply: true\n---\n\nRules.\n").unwrap();
        assert!(!mdc.legacy);
        assert!(mdc.front_matter.always_apply);
        assert_eq!(
            mdc.serialize().unwrap(),
            "---\nalwaysApply: true\n---\n\nRules.\n"
        );
    }

    #[test]
    fn instructions_from_canonical_use_mdc_shape() {
        let instructions = CursorInstructions::from_canonical(&CanonicalInstructions {
            meta: Metadata {
                name: "style".into(),
                body: "Use tabs.\n".into(),
                ..Default::default()
            },
            globs: Some("*.go".into()),
            always_apply: true,
            ..Default::default()
        });
        assert!(!instructions.legacy);
        let text = instructions.serialize().unwrap();
        assert!(text.starts_with("---\nname: style\n"));
        assert!(text.contains("globs: '*.go'"));
        assert!(text.contains("alwaysApply: true"));
    }
}
