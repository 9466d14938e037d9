//! Artifact conversion between dialects.
//!
//! Conversion always pivots through the canonical record: the source adapter
//! is projected with `to_canonical`, the zero-value target adapter is
//! hydrated with `from_canonical`, and the target is serialized. Anything the
//! target cannot hold is listed in the returned warnings, one per field, in
//! field declaration order.

use crate::adapters::{
    Artifact, ArtifactFormat, CommandArtifact, InstructionsArtifact, SkillArtifact,
};
use crate::dialect::{ArtifactKind, Dialect};
use crate::error::Result;
use crate::model::{CanonicalArtifact, Field};
use crate::naming;

/// Output of [`convert_with_info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Serialized target document, ready to write verbatim.
    pub content: String,
    /// Human-readable data-loss advisories.
    pub warnings: Vec<String>,
    /// Target filename, independent of `content`.
    pub filename: String,
    /// Target directory relative to a project root.
    pub directory: String,
}

struct FieldRule {
    field: Field,
    supported_by: &'static [Dialect],
}

const CLAUDE_LIKE: &[Dialect] = &[Dialect::Claude, Dialect::OpenCode];

static SKILL_FIELDS: &[FieldRule] = &[
    FieldRule {
        field: Field::Version,
        supported_by: &[Dialect::Claude, Dialect::OpenCode, Dialect::Copilot],
    },
    FieldRule {
        field: Field::Author,
        supported_by: &[Dialect::Claude, Dialect::OpenCode, Dialect::Copilot],
    },
    FieldRule {
        field: Field::Globs,
        supported_by: &[Dialect::Claude, Dialect::OpenCode, Dialect::Cursor],
    },
    FieldRule {
        field: Field::Includes,
        supported_by: CLAUDE_LIKE,
    },
    FieldRule {
        field: Field::AllowedTools,
        supported_by: CLAUDE_LIKE,
    },
];

static COMMAND_FIELDS: &[FieldRule] = &[
    FieldRule {
        field: Field::Version,
        supported_by: CLAUDE_LIKE,
    },
    FieldRule {
        field: Field::Author,
        supported_by: CLAUDE_LIKE,
    },
    FieldRule {
        field: Field::AllowedTools,
        supported_by: CLAUDE_LIKE,
    },
];

static INSTRUCTIONS_FIELDS: &[FieldRule] = &[
    FieldRule {
        field: Field::Version,
        supported_by: &[],
    },
    FieldRule {
        field: Field::Author,
        supported_by: &[],
    },
    FieldRule {
        field: Field::Globs,
        supported_by: &[Dialect::Cursor],
    },
    FieldRule {
        field: Field::ApplyTo,
        supported_by: &[Dialect::Copilot],
    },
    FieldRule {
        field: Field::AlwaysApply,
        supported_by: &[Dialect::Cursor],
    },
];

fn field_rules(kind: ArtifactKind) -> &'static [FieldRule] {
    match kind {
        ArtifactKind::Skill => SKILL_FIELDS,
        ArtifactKind::Command => COMMAND_FIELDS,
        ArtifactKind::Instructions => INSTRUCTIONS_FIELDS,
    }
}

/// Whether `dialect` can hold `field` for artifacts of `kind`.
pub fn supports_field(kind: ArtifactKind, dialect: Dialect, field: Field) -> bool {
    field_rules(kind)
        .iter()
        .find(|rule| rule.field == field)
        .is_some_and(|rule| rule.supported_by.contains(&dialect))
}

/// Fields present in `canonical` that `target` drops, in declaration order.
pub fn lost_fields(canonical: &CanonicalArtifact, target: Dialect) -> Vec<Field> {
    field_rules(canonical.kind())
        .iter()
        .filter(|rule| canonical.has(rule.field) && !rule.supported_by.contains(&target))
        .map(|rule| rule.field)
        .collect()
}

/// Converts `artifact` to `target` and returns the serialized document.
pub fn convert(artifact: &Artifact, target: Dialect) -> Result<String> {
    Ok(convert_with_info(artifact, target)?.content)
}

/// Converts `artifact` to `target`, reporting every dropped field.
pub fn convert_with_info(artifact: &Artifact, target: Dialect) -> Result<Conversion> {
    convert_named(artifact, target, None)
}

/// Like [`convert_with_info`], naming the output after `fallback_name` when
/// the artifact does not name itself, e.g. a command file whose name is only
/// its file stem. An empty `fallback_name` is ignored.
///
/// The fallback decides where the output goes. It is written into the output
/// only when the target file has a different shape from the source, so a
/// same-dialect conversion leaves the content unchanged.
pub fn convert_with_fallback_name(
    artifact: &Artifact,
    target: Dialect,
    fallback_name: &str,
) -> Result<Conversion> {
    let fallback =
        Some(fallback_name).filter(|name| !name.is_empty() && !artifact.has_explicit_name());
    convert_named(artifact, target, fallback)
}

fn convert_named(
    artifact: &Artifact,
    target: Dialect,
    fallback: Option<&str>,
) -> Result<Conversion> {
    let mut canonical = artifact.to_canonical();
    if let Some(name) = fallback {
        canonical.meta_mut().name = name.to_string();
    }
    let mut converted = Artifact::from_canonical(target, &canonical);
    let same_shape = artifact.shape() == converted.shape();
    if same_shape {
        carry_dialect_extras(artifact, &mut converted);
    }

    let mut warnings = Vec::new();
    if artifact.kind() == ArtifactKind::Command
        && artifact.dialect().has_commands()
        && !target.has_commands()
    {
        warnings.push(format!(
            "{} has no command concept; command '{}' was converted to a rule",
            target.display_name(),
            canonical.meta().name
        ));
    }
    for field in lost_fields(&canonical, target) {
        warnings.push(format!(
            "{} field '{}' is not supported by {} and was dropped",
            artifact.kind(),
            field.key(),
            target.display_name()
        ));
    }
    if !same_shape {
        for key in dialect_only_keys(artifact) {
            warnings.push(format!(
                "{}-specific field '{}' is not supported by {} and was dropped",
                artifact.dialect().display_name(),
                key,
                target.display_name()
            ));
        }
    }

    let (filename, directory) = match fallback {
        Some(name) if !converted.is_legacy_cursor() => (
            naming::output_filename(converted.kind(), target, name),
            naming::output_directory(converted.kind(), target, name),
        ),
        _ => (converted.output_filename(), converted.output_directory()),
    };

    Ok(Conversion {
        content: converted.serialize()?,
        warnings,
        filename,
        directory,
    })
}

/// Front-matter keys only the source's own file shape can hold, sorted.
fn dialect_only_keys(artifact: &Artifact) -> Vec<String> {
    let mut keys: Vec<String> = artifact.format().extra().keys().cloned().collect();
    let rule_always_apply = match artifact {
        Artifact::Skill(SkillArtifact::Cursor(rule))
        | Artifact::Command(CommandArtifact::Cursor(rule)) => rule.front_matter.always_apply,
        _ => false,
    };
    if rule_always_apply {
        keys.push(Field::AlwaysApply.key().to_string());
    }
    keys.sort();
    keys
}

/// Copies what the canonical record cannot hold between adapters of the same
/// shape: unknown keys, Cursor's `alwaysApply` on rules, the legacy
/// `.cursorrules` flag, and whether a name was explicit or derived.
fn carry_dialect_extras(source: &Artifact, target: &mut Artifact) {
    *target.format_mut().extra_mut() = source.format().extra().clone();
    if !source.has_explicit_name() {
        target.format_mut().clear_name();
    }

    match (source, target) {
        (
            Artifact::Skill(SkillArtifact::Cursor(src)),
            Artifact::Skill(SkillArtifact::Cursor(dst)),
        )
        | (
            Artifact::Command(CommandArtifact::Cursor(src)),
            Artifact::Command(CommandArtifact::Cursor(dst)),
        ) => dst.front_matter.always_apply = src.front_matter.always_apply,
        (
            Artifact::Instructions(InstructionsArtifact::Cursor(src)),
            Artifact::Instructions(InstructionsArtifact::Cursor(dst)),
        ) => dst.legacy = src.legacy,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(dialect: Dialect, content: &str) -> Artifact {
        Artifact::parse(ArtifactKind::Skill, dialect, content).unwrap()
    }

    #[test]
    fn every_kind_lists_version_and_author() {
        for kind in ArtifactKind::ALL {
            let fields: Vec<_> = field_rules(kind).iter().map(|r| r.field).collect();
            assert!(fields.contains(&Field::Version), "{kind}");
            assert!(fields.contains(&Field::Author), "{kind}");
            let mut sorted = fields.clone();
            sorted.sort();
            assert_eq!(fields, sorted, "{kind} rules must follow declaration order");
        }
    }

    #[test]
    fn supports_field_matches_table() {
        assert!(supports_field(ArtifactKind::Skill, Dialect::Cursor, Field::Globs));
        assert!(!supports_field(ArtifactKind::Skill, Dialect::Copilot, Field::Globs));
        assert!(supports_field(ArtifactKind::Instructions, Dialect::Copilot, Field::ApplyTo));
        assert!(!supports_field(ArtifactKind::Command, Dialect::Copilot, Field::Includes));
    }

    #[test]
    fn unknown_keys_survive_claude_to_opencode() {
        let source = skill(Dialect::Claude, "---\nname: a\nlicense: MIT\n---\nBody\n");
        let conversion = convert_with_info(&source, Dialect::OpenCode).unwrap();
        assert!(conversion.warnings.is_empty());
        assert!(conversion.content.contains("license: MIT"));
    }

    #[test]
    fn unknown_keys_warn_when_shape_changes() {
        let source = skill(Dialect::Claude, "---\nname: a\nmodel: opus\nlicense: MIT\n---\nB\n");
        let conversion = convert_with_info(&source, Dialect::Copilot).unwrap();
        assert_eq!(
            conversion.warnings,
            vec![
                "Claude-specific field 'license' is not supported by Copilot and was dropped",
                "Claude-specific field 'model' is not supported by Copilot and was dropped",
            ]
        );
        assert!(!conversion.content.contains("license"));
    }

    #[test]
    fn cursor_always_apply_on_rule_is_reported_when_leaving_cursor() {
        let source = skill(Dialect::Cursor, "---\nname: x\nalwaysApply: true\n---\nB\n");
        let to_claude = convert_with_info(&source, Dialect::Claude).unwrap();
        assert_eq!(
            to_claude.warnings,
            vec!["Cursor-specific field 'alwaysApply' is not supported by Claude and was dropped"]
        );

        let to_cursor = convert_with_info(&source, Dialect::Cursor).unwrap();
        assert!(to_cursor.warnings.is_empty());
        assert!(to_cursor.content.contains("alwaysApply: true"));
    }

    #[test]
    fn derived_cursor_name_is_not_written_back() {
        let content = "# Testing\n\nRun the suite.\n";
        let source = skill(Dialect::Cursor, content);
        assert_eq!(convert(&source, Dialect::Cursor).unwrap(), content);

        let to_claude = convert(&source, Dialect::Claude).unwrap();
        assert!(to_claude.starts_with("---\nname: Testing\n---\n"));
    }

    #[test]
    fn conversion_reports_target_location() {
        let source = skill(Dialect::Claude, "---\nname: Pdf Helper\n---\nB\n");
        let conversion = convert_with_info(&source, Dialect::Copilot).unwrap();
        assert_eq!(conversion.filename, "pdf-helper.agent.md");
        assert_eq!(conversion.directory, ".github/agents");
    }

    fn command(dialect: Dialect, content: &str) -> Artifact {
        Artifact::parse(ArtifactKind::Command, dialect, content).unwrap()
    }

    #[test]
    fn fallback_name_places_a_nameless_command() {
        let source = command(Dialect::Claude, "---\ndescription: Ship it\n---\n\nDeploy.\n");

        let to_copilot = convert_with_fallback_name(&source, Dialect::Copilot, "deploy").unwrap();
        assert_eq!(to_copilot.filename, "deploy.prompt.md");
        assert_eq!(to_copilot.directory, ".github/prompts");
        assert!(to_copilot.content.contains("agent: deploy"));

        let to_claude = convert_with_fallback_name(&source, Dialect::Claude, "deploy").unwrap();
        assert_eq!(to_claude.filename, "deploy.md");
        assert_eq!(to_claude.directory, ".claude/commands");
        assert_eq!(to_claude.content, convert(&source, Dialect::Claude).unwrap());
        assert!(!to_claude.content.contains("name:"));
    }

    #[test]
    fn explicit_name_wins_over_fallback() {
        let source = command(Dialect::Claude, "---\nname: ship\n---\n\nDeploy.\n");
        let conversion = convert_with_fallback_name(&source, Dialect::OpenCode, "deploy").unwrap();
        assert_eq!(conversion.filename, "ship.md");

        let unnamed = command(Dialect::Claude, "---\ndescription: d\n---\n\nB\n");
        let ignored = convert_with_fallback_name(&unnamed, Dialect::Copilot, "").unwrap();
        assert_eq!(ignored, convert_with_info(&unnamed, Dialect::Copilot).unwrap());
    }

    #[test]
    fn prompt_without_agent_takes_its_file_name() {
        let source = command(Dialect::Copilot, "---\ndescription: Review\n---\n\nReview it.\n");
        let conversion = convert_with_fallback_name(&source, Dialect::Claude, "review").unwrap();
        assert_eq!(conversion.filename, "review.md");
        assert!(conversion.content.contains("name: review"));
    }

    #[test]
    fn cursor_rule_keeps_its_file_name_and_content() {
        let content = "# Testing\n\nRun the suite.\n";
        let source = skill(Dialect::Cursor, content);
        let conversion = convert_with_fallback_name(&source, Dialect::Cursor, "run-tests").unwrap();
        assert_eq!(conversion.filename, "run-tests.mdc");
        assert_eq!(conversion.content, content);

        let to_claude = convert_with_fallback_name(&source, Dialect::Claude, "run-tests").unwrap();
        assert_eq!(to_claude.directory, ".claude/skills/run-tests");
        assert!(to_claude.content.starts_with("---\nname: run-tests\n"));
    }
}
