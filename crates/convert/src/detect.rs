//! Path-based dialect and kind detection.
//!
//! Detection looks only at the path string. Each question is answered by an
//! ordered rule table and the first matching rule wins, so overlapping
//! patterns always resolve the same way:
//!
//! | Rule | Dialect |
//! |---|---|
//! | `*.agent.md`, `*.prompt.md`, `*.instructions.md`, `copilot-instructions.md` | Copilot |
//! | `*.mdc`, `.cursorrules`, a `.cursor` directory | Cursor |
//! | a `.github` directory | Copilot |
//! | a `.opencode` directory, `AGENTS.md`, `opencode.json` | OpenCode |
//! | a `.claude` directory, `CLAUDE.md`, `.mcp.json` | Claude |
//! | `SKILL.md` | Claude |
//!
//! A `.cursor/agents/review.agent.md` path is therefore Copilot: suffix
//! rules come before directory rules.

use crate::adapters::Artifact;
use crate::dialect::{ArtifactKind, Dialect};
use crate::error::{Error, Result};
use std::path::Path;

/// A single path test.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// File name ends with the text (case-sensitive).
    Suffix(&'static str),
    /// File name equals the text.
    FileName(&'static str),
    /// Some directory component equals the text.
    Segment(&'static str),
}

struct Rule<T> {
    any_of: &'static [Pattern],
    yields: T,
}

static DIALECT_RULES: &[Rule<Dialect>] = &[
    Rule {
        any_of: &[
            Pattern::Suffix(".agent.md"),
            Pattern::Suffix(".prompt.md"),
            Pattern::Suffix(".instructions.md"),
            Pattern::FileName("copilot-instructions.md"),
        ],
        yields: Dialect::Copilot,
    },
    Rule {
        any_of: &[
            Pattern::Suffix(".mdc"),
            Pattern::FileName(".cursorrules"),
            Pattern::Segment(".cursor"),
        ],
        yields: Dialect::Cursor,
    },
    Rule {
        any_of: &[Pattern::Segment(".github")],
        yields: Dialect::Copilot,
    },
    Rule {
        any_of: &[
            Pattern::Segment(".opencode"),
            Pattern::FileName("AGENTS.md"),
            Pattern::FileName("opencode.json"),
        ],
        yields: Dialect::OpenCode,
    },
    Rule {
        any_of: &[
            Pattern::Segment(".claude"),
            Pattern::FileName("CLAUDE.md"),
            Pattern::FileName(".mcp.json"),
        ],
        yields: Dialect::Claude,
    },
    Rule {
        any_of: &[Pattern::FileName("SKILL.md")],
        yields: Dialect::Claude,
    },
];

/// File names and suffixes that fix the kind regardless of directory.
static EXACT_KIND_RULES: &[Rule<ArtifactKind>] = &[
    Rule {
        any_of: &[Pattern::FileName("SKILL.md"), Pattern::Suffix(".agent.md")],
        yields: ArtifactKind::Skill,
    },
    Rule {
        any_of: &[Pattern::Suffix(".prompt.md")],
        yields: ArtifactKind::Command,
    },
    Rule {
        any_of: &[
            Pattern::Suffix(".instructions.md"),
            Pattern::FileName("copilot-instructions.md"),
            Pattern::FileName("CLAUDE.md"),
            Pattern::FileName("AGENTS.md"),
            Pattern::FileName(".cursorrules"),
        ],
        yields: ArtifactKind::Instructions,
    },
];

/// Directory keywords, checked in order against the lowercased directory
/// part of the path.
static KIND_KEYWORDS: &[(&str, ArtifactKind)] = &[
    ("commands", ArtifactKind::Command),
    ("command", ArtifactKind::Command),
    ("prompts", ArtifactKind::Command),
    ("skills", ArtifactKind::Skill),
    ("skill", ArtifactKind::Skill),
    ("agents", ArtifactKind::Skill),
    ("instructions", ArtifactKind::Instructions),
    ("rules", ArtifactKind::Instructions),
];

/// File names that can hold an MCP config.
static MCP_FILE_NAMES: &[&str] = &[
    "mcp.json",
    ".mcp.json",
    "opencode.json",
    "opencode.jsonc",
    "claude_desktop_config.json",
    ".claude.json",
];

static MCP_RULES: &[Rule<Dialect>] = &[
    Rule {
        any_of: &[
            Pattern::FileName("opencode.json"),
            Pattern::FileName("opencode.jsonc"),
        ],
        yields: Dialect::OpenCode,
    },
    Rule {
        any_of: &[Pattern::Segment(".vscode"), Pattern::Segment(".github")],
        yields: Dialect::Copilot,
    },
    Rule {
        any_of: &[Pattern::Segment(".cursor")],
        yields: Dialect::Cursor,
    },
];

/// Files whose name is fixed by their dialect and says nothing about the
/// artifact inside.
static FIXED_NAME_FILES: &[&str] = &[
    "CLAUDE.md",
    "AGENTS.md",
    "copilot-instructions.md",
    ".cursorrules",
];

/// A path split into directory components and a file name.
struct PathView<'a> {
    dirs: Vec<&'a str>,
    file_name: &'a str,
}

impl<'a> PathView<'a> {
    fn new(path: &'a str) -> Self {
        let mut parts: Vec<&str> = path
            .split(['/', '\\'])
            .filter(|part| !part.is_empty() && *part != ".")
            .collect();
        let file_name = parts.pop().unwrap_or_default();
        Self {
            dirs: parts,
            file_name,
        }
    }

    fn matches(&self, pattern: Pattern) -> bool {
        match pattern {
            Pattern::Suffix(suffix) => self.file_name.ends_with(suffix),
            Pattern::FileName(name) => self.file_name == name,
            Pattern::Segment(segment) => self.dirs.iter().any(|dir| *dir == segment),
        }
    }

    fn first_match<T: Copy>(&self, rules: &[Rule<T>]) -> Option<T> {
        rules
            .iter()
            .find(|rule| rule.any_of.iter().any(|p| self.matches(*p)))
            .map(|rule| rule.yields)
    }

    fn is_markdown(&self) -> bool {
        self.file_name.ends_with(".md") || self.file_name.ends_with(".mdc")
    }

    fn is_mcp_config(&self) -> bool {
        MCP_FILE_NAMES.iter().any(|name| *name == self.file_name)
    }

    fn lowercase_dirs(&self) -> String {
        self.dirs.join("/").to_lowercase()
    }

    /// File name up to its first dot.
    fn stem(&self) -> &'a str {
        self.file_name
            .split_once('.')
            .map_or(self.file_name, |(stem, _)| stem)
    }

    fn lowercase_stem(&self) -> String {
        self.stem().to_lowercase()
    }
}

fn with_view<T>(path: &Path, f: impl FnOnce(&PathView<'_>) -> T) -> T {
    let text = path.to_string_lossy();
    f(&PathView::new(&text))
}

/// The dialect a path belongs to, if any rule matches.
pub fn detect_dialect(path: impl AsRef<Path>) -> Option<Dialect> {
    with_view(path.as_ref(), |view| view.first_match(DIALECT_RULES))
}

/// Result of [`classify_artifact_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindMatch {
    pub kind: ArtifactKind,
    /// Set when the path also mentions a keyword of another kind, e.g.
    /// `commands/skill-reference.md`. The kind is still the first match.
    pub ambiguous: bool,
}

/// The artifact kind a path holds, if any rule matches.
pub fn detect_artifact_kind(path: impl AsRef<Path>) -> Option<ArtifactKind> {
    classify_artifact_kind(path).map(|found| found.kind)
}

/// Like [`detect_artifact_kind`], also reporting keyword ambiguity.
pub fn classify_artifact_kind(path: impl AsRef<Path>) -> Option<KindMatch> {
    with_view(path.as_ref(), |view| {
        if let Some(kind) = view.first_match(EXACT_KIND_RULES) {
            return Some(KindMatch {
                kind,
                ambiguous: false,
            });
        }
        if !view.is_markdown() {
            return None;
        }

        let dirs = view.lowercase_dirs();
        if let Some(&(_, kind)) = KIND_KEYWORDS
            .iter()
            .find(|(keyword, _)| dirs.contains(keyword))
        {
            let full = format!("{dirs}/{}", view.lowercase_stem());
            let ambiguous = KIND_KEYWORDS
                .iter()
                .any(|(keyword, other)| *other != kind && full.contains(keyword));
            return Some(KindMatch { kind, ambiguous });
        }

        view.matches(Pattern::Suffix(".mdc")).then_some(KindMatch {
            kind: ArtifactKind::Instructions,
            ambiguous: false,
        })
    })
}

/// Kind and dialect for an artifact path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub kind: ArtifactKind,
    /// Claude when no dialect rule matched.
    pub dialect: Dialect,
    pub ambiguous: bool,
}

/// Detects kind and dialect together. Returns `None` when the kind cannot be
/// determined; a missing dialect signal falls back to Claude.
pub fn detect(path: impl AsRef<Path>) -> Option<Detection> {
    let path = path.as_ref();
    let found = classify_artifact_kind(path)?;
    Some(Detection {
        kind: found.kind,
        dialect: detect_dialect(path).unwrap_or(Dialect::Claude),
        ambiguous: found.ambiguous,
    })
}

/// Parses `content` using the kind and dialect detected from `path`.
pub fn parse_artifact_path(path: impl AsRef<Path>, content: &str) -> Result<Artifact> {
    let path = path.as_ref();
    let detection = detect(path).ok_or_else(|| Error::Undetected {
        path: path.to_path_buf(),
    })?;
    Artifact::parse(detection.kind, detection.dialect, content)
}

/// The name an artifact takes from where it is stored: the directory of a
/// `SKILL.md`, else the file name up to its first dot. Empty for files such
/// as `CLAUDE.md` whose name is fixed by their dialect.
pub fn name_from_path(path: impl AsRef<Path>) -> String {
    with_view(path.as_ref(), |view| {
        if FIXED_NAME_FILES.iter().any(|name| *name == view.file_name) {
            return String::new();
        }
        if view.matches(Pattern::FileName("SKILL.md")) {
            return view.dirs.last().map(|dir| dir.to_string()).unwrap_or_default();
        }
        view.stem().to_string()
    })
}

/// Whether the file name is one MCP configs are stored under.
pub fn is_mcp_config_path(path: impl AsRef<Path>) -> bool {
    with_view(path.as_ref(), |view| view.is_mcp_config())
}

/// The dialect of an MCP config file. Files under `.vscode`/`.github` are
/// Copilot, under `.cursor` Cursor, `opencode.json` OpenCode, and any other
/// known config name Claude.
pub fn detect_mcp_format(path: impl AsRef<Path>) -> Option<Dialect> {
    with_view(path.as_ref(), |view| {
        if !view.is_mcp_config() {
            return None;
        }
        Some(view.first_match(MCP_RULES).unwrap_or(Dialect::Claude))
    })
}

/// Guesses an MCP config's dialect from its root key: `mcpServers` is
/// Claude, `mcp` OpenCode, `servers` Copilot.
pub fn detect_mcp_format_from_content(content: &str) -> Option<Dialect> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    let root = value.as_object()?;
    [
        ("mcpServers", Dialect::Claude),
        ("mcp", Dialect::OpenCode),
        ("servers", Dialect::Copilot),
    ]
    .into_iter()
    .find(|(key, _)| root.contains_key(*key))
    .map(|(_, dialect)| dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_rules() {
        let cases = [
            (".github/agents/review.agent.md", Some(Dialect::Copilot)),
            ("prompts/commit.prompt.md", Some(Dialect::Copilot)),
            ("rust.instructions.md", Some(Dialect::Copilot)),
            (".github/copilot-instructions.md", Some(Dialect::Copilot)),
            (".cursor/rules/style.mdc", Some(Dialect::Cursor)),
            ("style.mdc", Some(Dialect::Cursor)),
            (".cursorrules", Some(Dialect::Cursor)),
            (".cursor/notes.md", Some(Dialect::Cursor)),
            (".github/notes.md", Some(Dialect::Copilot)),
            (".opencode/skill/pdf/SKILL.md", Some(Dialect::OpenCode)),
            ("AGENTS.md", Some(Dialect::OpenCode)),
            (".claude/skills/pdf/SKILL.md", Some(Dialect::Claude)),
            ("CLAUDE.md", Some(Dialect::Claude)),
            ("skills/pdf/SKILL.md", Some(Dialect::Claude)),
            ("docs/readme.md", None),
        ];
        for (path, expected) in cases {
            assert_eq!(detect_dialect(path), expected, "{path}");
        }
    }

    #[test]
    fn suffix_beats_cursor_segment() {
        assert_eq!(
            detect_dialect(".cursor/agents/review.agent.md"),
            Some(Dialect::Copilot)
        );
        assert_eq!(
            detect_dialect(".claude/rules/style.mdc"),
            Some(Dialect::Cursor)
        );
    }

    #[test]
    fn cursorrules_file_name_is_not_a_cursor_segment_lookalike() {
        assert_eq!(detect_dialect("project/.cursorrules"), Some(Dialect::Cursor));
        assert_eq!(detect_dialect("my.cursor/notes.md"), None);
    }

    #[test]
    fn windows_separators_are_understood() {
        assert_eq!(
            detect_dialect(r"repo\.claude\commands\deploy.md"),
            Some(Dialect::Claude)
        );
        assert_eq!(
            detect_artifact_kind(r"repo\.claude\commands\deploy.md"),
            Some(ArtifactKind::Command)
        );
    }

    #[test]
    fn kind_rules() {
        let cases = [
            (".claude/skills/pdf/SKILL.md", Some(ArtifactKind::Skill)),
            ("review.agent.md", Some(ArtifactKind::Skill)),
            ("commit.prompt.md", Some(ArtifactKind::Command)),
            ("rust.instructions.md", Some(ArtifactKind::Instructions)),
            ("CLAUDE.md", Some(ArtifactKind::Instructions)),
            ("AGENTS.md", Some(ArtifactKind::Instructions)),
            (".cursorrules", Some(ArtifactKind::Instructions)),
            (".claude/commands/deploy.md", Some(ArtifactKind::Command)),
            (".opencode/command/deploy.md", Some(ArtifactKind::Command)),
            (".github/prompts/x.md", Some(ArtifactKind::Command)),
            (".claude/agents/planner.md", Some(ArtifactKind::Skill)),
            (".cursor/rules/style.mdc", Some(ArtifactKind::Instructions)),
            ("style.mdc", Some(ArtifactKind::Instructions)),
            ("docs/readme.md", None),
            (".claude/commands/run.sh", None),
        ];
        for (path, expected) in cases {
            assert_eq!(detect_artifact_kind(path), expected, "{path}");
        }
    }

    #[test]
    fn exact_names_win_over_directory_keywords() {
        assert_eq!(
            detect_artifact_kind("commands/pdf/SKILL.md"),
            Some(ArtifactKind::Skill)
        );
        assert_eq!(
            classify_artifact_kind("skills/x/commit.prompt.md"),
            Some(KindMatch {
                kind: ArtifactKind::Command,
                ambiguous: false
            })
        );
    }

    #[test]
    fn command_keyword_precedes_skill_keyword() {
        assert_eq!(
            detect_artifact_kind("skills/commands/x.md"),
            Some(ArtifactKind::Command)
        );
    }

    #[test]
    fn incidental_keyword_in_file_name_is_flagged() {
        let found = classify_artifact_kind(".claude/commands/skill-reference.md").unwrap();
        assert_eq!(found.kind, ArtifactKind::Command);
        assert!(found.ambiguous);

        let plain = classify_artifact_kind(".claude/commands/deploy.md").unwrap();
        assert!(!plain.ambiguous);
    }

    #[test]
    fn detect_defaults_dialect_to_claude() {
        let found = detect("docs/commands/deploy.md").unwrap();
        assert_eq!(found.kind, ArtifactKind::Command);
        assert_eq!(found.dialect, Dialect::Claude);
        assert!(detect("docs/readme.md").is_none());
    }

    #[test]
    fn parse_artifact_path_reports_undetected() {
        let err = parse_artifact_path("notes/readme.md", "# hi").unwrap_err();
        assert!(matches!(err, Error::Undetected { .. }));

        let artifact =
            parse_artifact_path(".github/prompts/ship.prompt.md", "---\nagent: ship\n---\nGo.")
                .unwrap();
        assert_eq!(artifact.kind(), ArtifactKind::Command);
        assert_eq!(artifact.dialect(), Dialect::Copilot);
        assert_eq!(artifact.name(), "ship");
    }

    #[test]
    fn names_come_from_file_stem_or_skill_directory() {
        assert_eq!(name_from_path(".claude/commands/deploy.md"), "deploy");
        assert_eq!(name_from_path(".github/prompts/review.prompt.md"), "review");
        assert_eq!(name_from_path(".cursor/rules/pdf-helper.mdc"), "pdf-helper");
        assert_eq!(name_from_path(".claude/skills/pdf/SKILL.md"), "pdf");
        assert_eq!(name_from_path("SKILL.md"), "");
        assert_eq!(name_from_path("repo/CLAUDE.md"), "");
        assert_eq!(name_from_path(".github/copilot-instructions.md"), "");
        assert_eq!(name_from_path(".cursorrules"), "");
    }

    #[test]
    fn mcp_path_rules() {
        let cases = [
            (".mcp.json", Some(Dialect::Claude)),
            ("claude_desktop_config.json", Some(Dialect::Claude)),
            ("home/.claude.json", Some(Dialect::Claude)),
            (".claude/mcp.json", Some(Dialect::Claude)),
            ("mcp.json", Some(Dialect::Claude)),
            (".vscode/mcp.json", Some(Dialect::Copilot)),
            (".github/mcp.json", Some(Dialect::Copilot)),
            (".cursor/mcp.json", Some(Dialect::Cursor)),
            ("opencode.json", Some(Dialect::OpenCode)),
            (".vscode/opencode.jsonc", Some(Dialect::OpenCode)),
            ("package.json", None),
            (".claude/settings.json", None),
        ];
        for (path, expected) in cases {
            assert_eq!(detect_mcp_format(path), expected, "{path}");
        }
        assert!(is_mcp_config_path(".cursor/mcp.json"));
        assert!(!is_mcp_config_path("tsconfig.json"));
    }

    #[test]
    fn mcp_content_probe() {
        assert_eq!(
            detect_mcp_format_from_content(r#"{"mcpServers":{}}"#),
            Some(Dialect::Claude)
        );
        assert_eq!(
            detect_mcp_format_from_content(r#"{"$schema":"x","mcp":{}}"#),
            Some(Dialect::OpenCode)
        );
        assert_eq!(
            detect_mcp_format_from_content(r#"{"servers":{},"inputs":[]}"#),
            Some(Dialect::Copilot)
        );
        assert_eq!(detect_mcp_format_from_content("[]"), None);
        assert_eq!(detect_mcp_format_from_content("not json"), None);
    }
}
