//! Dialect-neutral records every artifact conversion pivots through.

use crate::dialect::ArtifactKind;

/// Fields shared by every artifact kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub description: String,
    pub version: Option<String>,
    pub author: Option<String>,
    /// Free-form markdown, carried verbatim through every conversion.
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalSkill {
    pub meta: Metadata,
    pub globs: Vec<String>,
    pub includes: Vec<String>,
    pub allowed_tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalCommand {
    pub meta: Metadata,
    pub allowed_tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalInstructions {
    pub meta: Metadata,
    /// Copilot `applyTo` glob.
    pub apply_to: Option<String>,
    /// Cursor comma-joined glob string.
    pub globs: Option<String>,
    /// Cursor `alwaysApply`.
    pub always_apply: bool,
}

/// The canonical record for any artifact kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalArtifact {
    Skill(CanonicalSkill),
    Command(CanonicalCommand),
    Instructions(CanonicalInstructions),
}

/// Optional fields that not every dialect can represent, in declaration
/// order. Warnings are emitted in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Version,
    Author,
    Globs,
    Includes,
    AllowedTools,
    ApplyTo,
    AlwaysApply,
}

impl Field {
    /// The front-matter key used for this field in warning text.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::Author => "author",
            Field::Globs => "globs",
            Field::Includes => "includes",
            Field::AllowedTools => "allowed-tools",
            Field::ApplyTo => "applyTo",
            Field::AlwaysApply => "alwaysApply",
        }
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl CanonicalArtifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            CanonicalArtifact::Skill(_) => ArtifactKind::Skill,
            CanonicalArtifact::Command(_) => ArtifactKind::Command,
            CanonicalArtifact::Instructions(_) => ArtifactKind::Instructions,
        }
    }

    pub fn meta(&self) -> &Metadata {
        match self {
            CanonicalArtifact::Skill(s) => &s.meta,
            CanonicalArtifact::Command(c) => &c.meta,
            CanonicalArtifact::Instructions(i) => &i.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut Metadata {
        match self {
            CanonicalArtifact::Skill(s) => &mut s.meta,
            CanonicalArtifact::Command(c) => &mut c.meta,
            CanonicalArtifact::Instructions(i) => &mut i.meta,
        }
    }

    /// Whether the source carried a non-empty value for `field`.
    pub fn has(&self, field: Field) -> bool {
        let meta = self.meta();
        match (field, self) {
            (Field::Version, _) => has_text(&meta.version),
            (Field::Author, _) => has_text(&meta.author),
            (Field::Globs, CanonicalArtifact::Skill(s)) => !s.globs.is_empty(),
            (Field::Globs, CanonicalArtifact::Instructions(i)) => has_text(&i.globs),
            (Field::Includes, CanonicalArtifact::Skill(s)) => !s.includes.is_empty(),
            (Field::AllowedTools, CanonicalArtifact::Skill(s)) => !s.allowed_tools.is_empty(),
            (Field::AllowedTools, CanonicalArtifact::Command(c)) => !c.allowed_tools.is_empty(),
            (Field::ApplyTo, CanonicalArtifact::Instructions(i)) => has_text(&i.apply_to),
            (Field::AlwaysApply, CanonicalArtifact::Instructions(i)) => i.always_apply,
            _ => false,
        }
    }
}
