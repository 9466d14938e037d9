//! Shared test utilities for skillport crates.
//!
//! Provides sample artifact documents for every dialect, a temp-dir fixture
//! that lays them out the way each tool expects on disk, and guards for
//! tests that touch process environment variables.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Sample documents, one per (dialect, kind), as each tool writes them.
pub mod samples {
    pub const CLAUDE_SKILL: &str = "---
name: pdf-helper
description: Extract text and tables from PDF files
version: 1.2.0
author: docs-team
globs:
- '*.pdf'
includes:
- reference.md
allowed-tools:
- Read
- Bash
---

# PDF helper

Use `pdftotext -layout` and check the output page count.
";

    pub const CLAUDE_COMMAND: &str = "---
name: deploy
description: Deploy the current branch to staging
allowed-tools:
- Bash
---

Run `make deploy ENV=staging` and report the URL.
";

    pub const CLAUDE_INSTRUCTIONS: &str = "# Project guide

Run `cargo fmt` before every commit.
";

    pub const COPILOT_AGENT: &str = "---
name: planner
description: Break work into reviewable steps
version: 0.3.0
---

List the steps before writing code.
";

    pub const COPILOT_PROMPT: &str = "---
agent: commit-msg
description: Write a conventional commit message
---

Summarize the staged diff in one line.
";

    pub const COPILOT_INSTRUCTIONS: &str = "---
name: rust-style
description: Rust conventions
applyTo: '**/*.rs'
---

Prefer `?` over `unwrap()` outside tests.
";

    pub const CURSOR_RULE: &str = "---
description: TypeScript style
globs: '*.ts,*.tsx'
---

# TypeScript

Use strict mode.
";

    pub const CURSOR_LEGACY_RULES: &str = "Always answer in English.
Keep functions short.
";

    pub const CLAUDE_MCP: &str = r#"{
  "mcpServers": {
    "filesystem": {
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-filesystem", "."],
      "env": {"LOG_LEVEL": "info"}
    }
  }
}
"#;
}

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = skillport_test_utils::set_env_var("SKILLPORT_DOC_VAR", Some("value"));
/// assert_eq!(std::env::var("SKILLPORT_DOC_VAR").unwrap(), "value");
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// A temporary project tree.
///
/// The tempdir is cleaned up when this struct is dropped.
pub struct TestFixture {
    pub tempdir: tempfile::TempDir,
}

impl TestFixture {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            tempdir: tempfile::tempdir()?,
        })
    }

    /// A fixture pre-populated with Claude artifacts and an MCP config:
    ///
    /// - `.claude/skills/pdf-helper/SKILL.md`
    /// - `.claude/commands/deploy.md`
    /// - `CLAUDE.md`
    /// - `.mcp.json`
    pub fn claude_project() -> std::io::Result<Self> {
        let fixture = Self::new()?;
        fixture.write(".claude/skills/pdf-helper/SKILL.md", samples::CLAUDE_SKILL)?;
        fixture.write(".claude/commands/deploy.md", samples::CLAUDE_COMMAND)?;
        fixture.write("CLAUDE.md", samples::CLAUDE_INSTRUCTIONS)?;
        fixture.write(".mcp.json", samples::CLAUDE_MCP)?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.tempdir.path()
    }

    /// Writes `content` at `relative`, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> std::io::Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Reads the file at `relative`.
    pub fn read(&self, relative: impl AsRef<Path>) -> std::io::Result<String> {
        std::fs::read_to_string(self.root().join(relative))
    }

    /// Creates an RAII guard that points HOME at this fixture.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(&self.root().to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_env_var_sets_and_restores() {
        let _g = env_guard();

        const KEY: &str = "SKILLPORT_TEST_UTILS_TEST_VAR";
        std::env::remove_var(KEY);

        {
            let _guard = set_env_var(KEY, Some("test_value"));
            assert_eq!(std::env::var(KEY).ok(), Some("test_value".to_string()));
        }
        assert!(std::env::var(KEY).is_err());
    }

    #[test]
    fn test_set_env_var_restores_previous_value() {
        let _g = env_guard();

        const KEY: &str = "SKILLPORT_TEST_RESTORE_VAR";
        std::env::set_var(KEY, "original");

        {
            let _guard = set_env_var(KEY, None);
            assert!(std::env::var(KEY).is_err());
        }
        assert_eq!(std::env::var(KEY).ok(), Some("original".to_string()));

        std::env::remove_var(KEY);
    }

    #[test]
    fn test_fixture_writes_nested_files() {
        let fixture = TestFixture::new().expect("fixture creation");
        let path = fixture.write("a/b/c.md", "hello").expect("write");
        assert!(path.starts_with(fixture.root()));
        assert_eq!(fixture.read("a/b/c.md").unwrap(), "hello");
    }

    #[test]
    fn test_claude_project_layout() {
        let fixture = TestFixture::claude_project().expect("fixture creation");
        for rel in [
            ".claude/skills/pdf-helper/SKILL.md",
            ".claude/commands/deploy.md",
            "CLAUDE.md",
            ".mcp.json",
        ] {
            assert!(fixture.root().join(rel).is_file(), "{rel}");
        }
    }

    #[test]
    fn samples_have_front_matter_where_expected() {
        for sample in [
            samples::CLAUDE_SKILL,
            samples::CLAUDE_COMMAND,
            samples::COPILOT_AGENT,
            samples::COPILOT_PROMPT,
            samples::COPILOT_INSTRUCTIONS,
            samples::CURSOR_RULE,
        ] {
            assert!(sample.starts_with("---\n"));
        }
        assert!(!samples::CURSOR_LEGACY_RULES.starts_with("---"));
        assert!(!samples::CLAUDE_INSTRUCTIONS.starts_with("---"));
    }
}
