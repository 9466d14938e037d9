//! Output filename and directory conventions.
//!
//! Every function here is a pure lookup over `(kind, dialect, name)`. The
//! installer joins `output_directory` and `output_filename` to get the final
//! location; nothing in this crate touches the filesystem.

use crate::dialect::{ArtifactKind, Dialect};

/// Converts a free-form name to a lowercase, hyphenated file stem.
///
/// An uppercase letter after a lowercase letter or digit starts a new word,
/// spaces, underscores and slashes become hyphens, and any other character
/// that is not ASCII alphanumeric is dropped. This also keeps `..` and path
/// separators out of generated paths.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if matches!(c, ' ' | '_' | '-' | '/' | '\t') {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        } else {
            continue;
        }
        prev = Some(c);
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn stem_or(name: &str, default: &str) -> String {
    let stem = kebab_case(name);
    if stem.is_empty() {
        default.to_string()
    } else {
        stem
    }
}

/// Filename an artifact of `kind` named `name` is written to in `dialect`.
pub fn output_filename(kind: ArtifactKind, dialect: Dialect, name: &str) -> String {
    match (kind, dialect) {
        (ArtifactKind::Skill, Dialect::Claude | Dialect::OpenCode) => "SKILL.md".to_string(),
        (ArtifactKind::Skill, Dialect::Copilot) => {
            format!("{}.agent.md", stem_or(name, "skill"))
        }
        (ArtifactKind::Skill, Dialect::Cursor) => format!("{}.mdc", stem_or(name, "skill")),

        (ArtifactKind::Command, Dialect::Claude | Dialect::OpenCode) => {
            format!("{}.md", stem_or(name, "command"))
        }
        (ArtifactKind::Command, Dialect::Copilot) => {
            format!("{}.prompt.md", stem_or(name, "command"))
        }
        (ArtifactKind::Command, Dialect::Cursor) => format!("{}.mdc", stem_or(name, "command")),

        (ArtifactKind::Instructions, Dialect::Claude) => "CLAUDE.md".to_string(),
        (ArtifactKind::Instructions, Dialect::OpenCode) => "AGENTS.md".to_string(),
        (ArtifactKind::Instructions, Dialect::Copilot) => match kebab_case(name) {
            stem if stem.is_empty() => "copilot-instructions.md".to_string(),
            stem => format!("{stem}.instructions.md"),
        },
        (ArtifactKind::Instructions, Dialect::Cursor) => {
            format!("{}.mdc", stem_or(name, "instructions"))
        }
    }
}

/// Directory, relative to a project root, that `output_filename` lives in.
pub fn output_directory(kind: ArtifactKind, dialect: Dialect, name: &str) -> String {
    match (kind, dialect) {
        (ArtifactKind::Skill, Dialect::Claude) => {
            format!(".claude/skills/{}", stem_or(name, "skill"))
        }
        (ArtifactKind::Skill, Dialect::OpenCode) => {
            format!(".opencode/skill/{}", stem_or(name, "skill"))
        }
        (ArtifactKind::Skill, Dialect::Copilot) => ".github/agents".to_string(),

        (ArtifactKind::Command, Dialect::Claude) => ".claude/commands".to_string(),
        (ArtifactKind::Command, Dialect::OpenCode) => ".opencode/command".to_string(),
        (ArtifactKind::Command, Dialect::Copilot) => ".github/prompts".to_string(),

        (ArtifactKind::Instructions, Dialect::Claude | Dialect::OpenCode) => ".".to_string(),
        (ArtifactKind::Instructions, Dialect::Copilot) => {
            if kebab_case(name).is_empty() {
                ".github".to_string()
            } else {
                ".github/instructions".to_string()
            }
        }

        (_, Dialect::Cursor) => ".cursor/rules".to_string(),
    }
}

/// Filename for a legacy Cursor `.cursorrules` document.
pub const CURSOR_LEGACY_FILENAME: &str = ".cursorrules";

/// Name taken from the first `# ` heading of a markdown body.
pub fn heading_name(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

const DERIVED_NAME_MAX_LEN: usize = 40;

/// Name derived from a description: kebab-cased, cut at a word boundary.
pub fn description_name(description: &str) -> Option<String> {
    let full = kebab_case(description);
    if full.is_empty() {
        return None;
    }
    if full.len() <= DERIVED_NAME_MAX_LEN {
        return Some(full);
    }
    let cut = &full[..DERIVED_NAME_MAX_LEN];
    let cut = match cut.rfind('-') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut,
    };
    Some(cut.to_string())
}
