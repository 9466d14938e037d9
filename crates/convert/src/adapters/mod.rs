//! Per-dialect artifact adapters and the closed sum types over them.
//!
//! Each artifact kind has one enum with a variant per dialect. Claude and
//! OpenCode share the same adapter structs since their files are identical;
//! the variant records which one a value came from. Cursor has no command
//! format, so a Cursor command is a [`CursorRule`].

mod claude;
mod copilot;
mod cursor;
pub mod traits;

pub use claude::{
    ClaudeCommand, ClaudeCommandFrontmatter, ClaudeInstructions, ClaudeInstructionsFrontmatter,
    ClaudeSkill, ClaudeSkillFrontmatter,
};
pub use copilot::{
    CopilotAgent, CopilotAgentFrontmatter, CopilotInstructions, CopilotInstructionsFrontmatter,
    CopilotPrompt, CopilotPromptFrontmatter, DEFAULT_PROMPT_NAME,
};
pub use cursor::{CursorInstructions, CursorRule, CursorRuleFrontmatter};
pub use traits::{ArtifactFormat, CanonicalForm, Extra};

use crate::dialect::{ArtifactKind, Dialect};
use crate::error::Result;
use crate::model::{CanonicalArtifact, CanonicalCommand, CanonicalInstructions, CanonicalSkill};
use crate::naming::{self, CURSOR_LEGACY_FILENAME};

/// The concrete file layout behind an adapter value.
///
/// Two artifacts with the same shape can carry every front-matter key
/// across, including keys no dialect table knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    ClaudeSkill,
    ClaudeCommand,
    ClaudeInstructions,
    CopilotAgent,
    CopilotPrompt,
    CopilotInstructions,
    CursorRule,
    CursorInstructions,
}

impl Shape {
    pub fn of(kind: ArtifactKind, dialect: Dialect) -> Self {
        match (kind, dialect) {
            (ArtifactKind::Skill, Dialect::Claude | Dialect::OpenCode) => Shape::ClaudeSkill,
            (ArtifactKind::Skill, Dialect::Copilot) => Shape::CopilotAgent,
            (ArtifactKind::Skill, Dialect::Cursor) => Shape::CursorRule,
            (ArtifactKind::Command, Dialect::Claude | Dialect::OpenCode) => Shape::ClaudeCommand,
            (ArtifactKind::Command, Dialect::Copilot) => Shape::CopilotPrompt,
            (ArtifactKind::Command, Dialect::Cursor) => Shape::CursorRule,
            (ArtifactKind::Instructions, Dialect::Claude | Dialect::OpenCode) => {
                Shape::ClaudeInstructions
            }
            (ArtifactKind::Instructions, Dialect::Copilot) => Shape::CopilotInstructions,
            (ArtifactKind::Instructions, Dialect::Cursor) => Shape::CursorInstructions,
        }
    }
}

/// A skill in one of the four dialects.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillArtifact {
    Claude(ClaudeSkill),
    OpenCode(ClaudeSkill),
    Copilot(CopilotAgent),
    Cursor(CursorRule),
}

impl SkillArtifact {
    pub fn parse(dialect: Dialect, content: &str) -> Result<Self> {
        Ok(match dialect {
            Dialect::Claude => Self::Claude(ClaudeSkill::parse(content)?),
            Dialect::OpenCode => Self::OpenCode(ClaudeSkill::parse(content)?),
            Dialect::Copilot => Self::Copilot(CopilotAgent::parse(content)?),
            Dialect::Cursor => Self::Cursor(CursorRule::parse(content)?),
        })
    }

    pub fn from_canonical(dialect: Dialect, skill: &CanonicalSkill) -> Self {
        match dialect {
            Dialect::Claude => Self::Claude(ClaudeSkill::from_canonical(skill)),
            Dialect::OpenCode => Self::OpenCode(ClaudeSkill::from_canonical(skill)),
            Dialect::Copilot => Self::Copilot(CopilotAgent::from_canonical(skill)),
            Dialect::Cursor => Self::Cursor(CursorRule::from_canonical(skill)),
        }
    }

    pub fn to_canonical(&self) -> CanonicalSkill {
        match self {
            Self::Claude(s) | Self::OpenCode(s) => s.to_canonical(),
            Self::Copilot(s) => s.to_canonical(),
            Self::Cursor(s) => s.to_canonical(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Self::Claude(_) => Dialect::Claude,
            Self::OpenCode(_) => Dialect::OpenCode,
            Self::Copilot(_) => Dialect::Copilot,
            Self::Cursor(_) => Dialect::Cursor,
        }
    }

    pub fn format(&self) -> &dyn ArtifactFormat {
        match self {
            Self::Claude(s) | Self::OpenCode(s) => s,
            Self::Copilot(s) => s,
            Self::Cursor(s) => s,
        }
    }

    fn format_mut(&mut self) -> &mut dyn ArtifactFormat {
        match self {
            Self::Claude(s) | Self::OpenCode(s) => s,
            Self::Copilot(s) => s,
            Self::Cursor(s) => s,
        }
    }
}

/// A command in one of the four dialects.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandArtifact {
    Claude(ClaudeCommand),
    OpenCode(ClaudeCommand),
    Copilot(CopilotPrompt),
    /// Cursor has no commands; the command is held as a rule.
    Cursor(CursorRule),
}

impl CommandArtifact {
    pub fn parse(dialect: Dialect, content: &str) -> Result<Self> {
        Ok(match dialect {
            Dialect::Claude => Self::Claude(ClaudeCommand::parse(content)?),
            Dialect::OpenCode => Self::OpenCode(ClaudeCommand::parse(content)?),
            Dialect::Copilot => Self::Copilot(CopilotPrompt::parse(content)?),
            Dialect::Cursor => Self::Cursor(CursorRule::parse(content)?),
        })
    }

    pub fn from_canonical(dialect: Dialect, command: &CanonicalCommand) -> Self {
        match dialect {
            Dialect::Claude => Self::Claude(ClaudeCommand::from_canonical(command)),
            Dialect::OpenCode => Self::OpenCode(ClaudeCommand::from_canonical(command)),
            Dialect::Copilot => Self::Copilot(CopilotPrompt::from_canonical(command)),
            Dialect::Cursor => Self::Cursor(CursorRule::from_canonical(command)),
        }
    }

    pub fn to_canonical(&self) -> CanonicalCommand {
        match self {
            Self::Claude(c) | Self::OpenCode(c) => c.to_canonical(),
            Self::Copilot(c) => c.to_canonical(),
            Self::Cursor(c) => c.to_canonical(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Self::Claude(_) => Dialect::Claude,
            Self::OpenCode(_) => Dialect::OpenCode,
            Self::Copilot(_) => Dialect::Copilot,
            Self::Cursor(_) => Dialect::Cursor,
        }
    }

    pub fn format(&self) -> &dyn ArtifactFormat {
        match self {
            Self::Claude(c) | Self::OpenCode(c) => c,
            Self::Copilot(c) => c,
            Self::Cursor(c) => c,
        }
    }

    fn format_mut(&mut self) -> &mut dyn ArtifactFormat {
        match self {
            Self::Claude(c) | Self::OpenCode(c) => c,
            Self::Copilot(c) => c,
            Self::Cursor(c) => c,
        }
    }
}

/// Project instructions in one of the four dialects.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionsArtifact {
    Claude(ClaudeInstructions),
    OpenCode(ClaudeInstructions),
    Copilot(CopilotInstructions),
    Cursor(CursorInstructions),
}

impl InstructionsArtifact {
    pub fn parse(dialect: Dialect, content: &str) -> Result<Self> {
        Ok(match dialect {
            Dialect::Claude => Self::Claude(ClaudeInstructions::parse(content)?),
            Dialect::OpenCode => Self::OpenCode(ClaudeInstructions::parse(content)?),
            Dialect::Copilot => Self::Copilot(CopilotInstructions::parse(content)?),
            Dialect::Cursor => Self::Cursor(CursorInstructions::parse(content)?),
        })
    }

    pub fn from_canonical(dialect: Dialect, instructions: &CanonicalInstructions) -> Self {
        match dialect {
            Dialect::Claude => Self::Claude(ClaudeInstructions::from_canonical(instructions)),
            Dialect::OpenCode => Self::OpenCode(ClaudeInstructions::from_canonical(instructions)),
            Dialect::Copilot => Self::Copilot(CopilotInstructions::from_canonical(instructions)),
            Dialect::Cursor => Self::Cursor(CursorInstructions::from_canonical(instructions)),
        }
    }

    pub fn to_canonical(&self) -> CanonicalInstructions {
        match self {
            Self::Claude(i) | Self::OpenCode(i) => i.to_canonical(),
            Self::Copilot(i) => i.to_canonical(),
            Self::Cursor(i) => i.to_canonical(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Self::Claude(_) => Dialect::Claude,
            Self::OpenCode(_) => Dialect::OpenCode,
            Self::Copilot(_) => Dialect::Copilot,
            Self::Cursor(_) => Dialect::Cursor,
        }
    }

    pub fn format(&self) -> &dyn ArtifactFormat {
        match self {
            Self::Claude(i) | Self::OpenCode(i) => i,
            Self::Copilot(i) => i,
            Self::Cursor(i) => i,
        }
    }

    fn format_mut(&mut self) -> &mut dyn ArtifactFormat {
        match self {
            Self::Claude(i) | Self::OpenCode(i) => i,
            Self::Copilot(i) => i,
            Self::Cursor(i) => i,
        }
    }
}

/// Any parsed artifact file.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Skill(SkillArtifact),
    Command(CommandArtifact),
    Instructions(InstructionsArtifact),
}

impl Artifact {
    /// Parses `content` as an artifact of `kind` in `dialect`.
    ///
    /// A command in a dialect without commands (Cursor) is parsed as that
    /// dialect's rule.
    pub fn parse(kind: ArtifactKind, dialect: Dialect, content: &str) -> Result<Self> {
        Ok(match kind {
            ArtifactKind::Skill => Self::Skill(SkillArtifact::parse(dialect, content)?),
            ArtifactKind::Command => Self::Command(CommandArtifact::parse(dialect, content)?),
            ArtifactKind::Instructions => {
                Self::Instructions(InstructionsArtifact::parse(dialect, content)?)
            }
        })
    }

    /// Builds the zero-value adapter for `dialect` and hydrates it.
    pub fn from_canonical(dialect: Dialect, canonical: &CanonicalArtifact) -> Self {
        match canonical {
            CanonicalArtifact::Skill(s) => Self::Skill(SkillArtifact::from_canonical(dialect, s)),
            CanonicalArtifact::Command(c) => {
                Self::Command(CommandArtifact::from_canonical(dialect, c))
            }
            CanonicalArtifact::Instructions(i) => {
                Self::Instructions(InstructionsArtifact::from_canonical(dialect, i))
            }
        }
    }

    pub fn to_canonical(&self) -> CanonicalArtifact {
        match self {
            Self::Skill(s) => CanonicalArtifact::Skill(s.to_canonical()),
            Self::Command(c) => CanonicalArtifact::Command(c.to_canonical()),
            Self::Instructions(i) => CanonicalArtifact::Instructions(i.to_canonical()),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Skill(_) => ArtifactKind::Skill,
            Self::Command(_) => ArtifactKind::Command,
            Self::Instructions(_) => ArtifactKind::Instructions,
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Self::Skill(s) => s.dialect(),
            Self::Command(c) => c.dialect(),
            Self::Instructions(i) => i.dialect(),
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::of(self.kind(), self.dialect())
    }

    pub fn format(&self) -> &dyn ArtifactFormat {
        match self {
            Self::Skill(s) => s.format(),
            Self::Command(c) => c.format(),
            Self::Instructions(i) => i.format(),
        }
    }

    pub(crate) fn format_mut(&mut self) -> &mut dyn ArtifactFormat {
        match self {
            Self::Skill(s) => s.format_mut(),
            Self::Command(c) => c.format_mut(),
            Self::Instructions(i) => i.format_mut(),
        }
    }

    pub fn name(&self) -> String {
        self.format().name()
    }

    pub fn has_explicit_name(&self) -> bool {
        self.format().has_explicit_name()
    }

    pub fn description(&self) -> &str {
        self.format().description()
    }

    pub fn body(&self) -> &str {
        self.format().body()
    }

    pub fn serialize(&self) -> Result<String> {
        self.format().serialize()
    }

    /// Filename this artifact is written to; see [`naming::output_filename`].
    pub fn output_filename(&self) -> String {
        if self.is_legacy_cursor() {
            return CURSOR_LEGACY_FILENAME.to_string();
        }
        naming::output_filename(self.kind(), self.dialect(), &self.name())
    }

    /// Directory this artifact is written to; see [`naming::output_directory`].
    pub fn output_directory(&self) -> String {
        if self.is_legacy_cursor() {
            return ".".to_string();
        }
        naming::output_directory(self.kind(), self.dialect(), &self.name())
    }

    pub(crate) fn is_legacy_cursor(&self) -> bool {
        matches!(
            self,
            Self::Instructions(InstructionsArtifact::Cursor(CursorInstructions { legacy: true, .. }))
        )
    }
}
