//! GitHub Copilot artifacts.
//!
//! ## Key differences from Claude:
//! - Skills become custom agents: a flat `<name>.agent.md` per skill
//! - Commands become prompt files (`<name>.prompt.md`) whose name lives under
//!   the `agent` key
//! - Instructions are `*.instructions.md` files scoped with an `applyTo` glob
//! - No globs, includes or tool allow-lists

use super::traits::{ArtifactFormat, CanonicalForm, Extra};
use crate::error::Result;
use crate::frontmatter::{de, parse_frontmatter, render_frontmatter, render_optional_frontmatter};
use crate::model::{CanonicalCommand, CanonicalInstructions, CanonicalSkill, Metadata};
use serde::{Deserialize, Serialize};

/// Name reported by a prompt file that has no `agent` key.
pub const DEFAULT_PROMPT_NAME: &str = "prompt";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopilotAgentFrontmatter {
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A Copilot custom agent, the Copilot home for skills.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopilotAgent {
    pub front_matter: CopilotAgentFrontmatter,
    pub body: String,
}

impl ArtifactFormat for CopilotAgent {
    fn parse(content: &str) -> Result<Self> {
        let parsed = parse_frontmatter::<CopilotAgentFrontmatter>(content)?;
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

impl CanonicalForm<CanonicalSkill> for CopilotAgent {
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
            ..Default::default()
        }
    }

    fn from_canonical(skill: &CanonicalSkill) -> Self {
        Self {
            front_matter: CopilotAgentFrontmatter {
                name: skill.meta.name.clone(),
                description: skill.meta.description.clone(),
                version: skill.meta.version.clone(),
                author: skill.meta.author.clone(),
                extra: Extra::new(),
            },
            body: skill.meta.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopilotPromptFrontmatter {
    /// Prompt name. Copilot reuses the `agent` key for it.
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A Copilot `.prompt.md` file, the Copilot home for commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopilotPrompt {
    pub front_matter: CopilotPromptFrontmatter,
    pub body: String,
}

impl ArtifactFormat for CopilotPrompt {
    fn parse(content: &str) -> Result<Self> {
        let parsed = parse_frontmatter::<CopilotPromptFrontmatter>(content)?;
        Ok(Self {
            front_matter: parsed.front_matter,
            body: parsed.body,
        })
    }

    fn name(&self) -> String {
        match self.front_matter.agent.as_deref() {
            Some(agent) if !agent.is_empty() => agent.to_string(),
            _ => DEFAULT_PROMPT_NAME.to_string(),
        }
    }

    fn has_explicit_name(&self) -> bool {
        self.front_matter.agent.as_deref().is_some_and(|agent| !agent.is_empty())
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
        self.front_matter.agent = None;
    }
}

impl CanonicalForm<CanonicalCommand> for CopilotPrompt {
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
        let agent = Some(command.meta.name.clone()).filter(|name| !name.is_empty());
        Self {
            front_matter: CopilotPromptFrontmatter {
                agent,
                description: command.meta.description.clone(),
                extra: Extra::new(),
            },
            body: command.meta.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopilotInstructionsFrontmatter {
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(
        default,
        rename = "applyTo",
        deserialize_with = "de::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub apply_to: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A `*.instructions.md` (or plain `copilot-instructions.md`) file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopilotInstructions {
    pub front_matter: CopilotInstructionsFrontmatter,
    pub body: String,
}

impl ArtifactFormat for CopilotInstructions {
    fn parse(content: &str) -> Result<Self> {
        let parsed = parse_frontmatter::<CopilotInstructionsFrontmatter>(content)?;
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

impl CanonicalForm<CanonicalInstructions> for CopilotInstructions {
    fn to_canonical(&self) -> CanonicalInstructions {
        CanonicalInstructions {
            meta: Metadata {
                name: self.front_matter.name.clone(),
                description: self.front_matter.description.clone(),
                version: None,
                author: None,
                body: self.body.clone(),
            },
            apply_to: self.front_matter.apply_to.clone(),
            ..Default::default()
        }
    }

    fn from_canonical(instructions: &CanonicalInstructions) -> Self {
        Self {
            front_matter: CopilotInstructionsFrontmatter {
                name: instructions.meta.name.clone(),
                description: instructions.meta.description.clone(),
                apply_to: instructions.apply_to.clone(),
                extra: Extra::new(),
            },
            body: instructions.meta.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_name_lives_under_agent_key() {
        let prompt = CopilotPrompt::parse(
            "---\nagent: review\ndescription: Review the diff\n---\n\nReview it.",
        )
        .unwrap();
        assert_eq!(prompt.name(), "review");
        assert_eq!(prompt.to_canonical().meta.name, "review");
    }

    #[test]
    fn prompt_without_agent_falls_back_to_literal() {
        let prompt = CopilotPrompt::parse("---\ndescription: Anonymous\n---\nDo it.").unwrap();
        assert_eq!(prompt.name(), DEFAULT_PROMPT_NAME);
    }

    #[test]
    fn prompt_from_canonical_writes_agent_key() {
        let prompt = CopilotPrompt::from_canonical(&CanonicalCommand {
            meta: Metadata {
                name: "commit-msg".into(),
                description: "Write a commit message".into(),
                body: "Summarize staged changes.\n".into(),
                ..Default::default()
            },
            allowed_tools: vec!["Bash".into()],
        });
        let text = prompt.serialize().unwrap();
        assert_eq!(
            text,
            "---\nagent: commit-msg\ndescription: Write a commit message\n---\n\nSummarize staged changes.\n"
        );
        assert!(!text.contains("name:"));
    }

    #[test]
    fn agent_keeps_version_and_author() {
        let agent = CopilotAgent::parse(
            "---\nname: planner\ndescription: Plans work\nversion: 0.3.0\nauthor: ops\n---\nPlan.",
        )
        .unwrap();
        let canonical = agent.to_canonical();
        assert_eq!(canonical.meta.version.as_deref(), Some("0.3.0"));
        assert_eq!(canonical.meta.author.as_deref(), Some("ops"));
        assert!(canonical.globs.is_empty());
    }

    #[test]
    fn instructions_apply_to_round_trips() {
        let content = "---\ndescription: Rust style\napplyTo: '**/*.rs'\n---\n\nUse rustfmt.\n";
        let instructions = CopilotInstructions::parse(content).unwrap();
        assert_eq!(instructions.front_matter.apply_to.as_deref(), Some("**/*.rs"));
        assert_eq!(instructions.serialize().unwrap(), content);
    }

    #[test]
    fn plain_copilot_instructions_stay_plain() {
        let content = "Always answer in English.\n";
        let instructions = CopilotInstructions::parse(content).unwrap();
        assert_eq!(instructions.serialize().unwrap(), content);
    }
}
