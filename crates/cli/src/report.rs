//! Convert reporting types for tracking what was written and what was skipped.

use serde::Serialize;
use std::path::PathBuf;

/// Reasons why a converted file was not written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum SkipReason {
    /// Destination already holds exactly the converted content
    Unchanged { path: PathBuf },
    /// Destination exists with different content and --force was not given
    WouldOverwrite { path: PathBuf },
}

impl SkipReason {
    /// Returns a human-readable description of the skip reason.
    pub fn description(&self) -> String {
        match self {
            Self::Unchanged { path } => format!("{} unchanged", path.display()),
            Self::WouldOverwrite { path } => {
                format!("{} already exists (would overwrite)", path.display())
            }
        }
    }

    /// Returns actionable guidance for the user.
    pub fn guidance(&self) -> Option<&str> {
        match self {
            Self::Unchanged { .. } => None,
            Self::WouldOverwrite { .. } => Some("Use --force to replace the existing file"),
        }
    }
}

/// A source file that produced output.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedItem {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Fields the target could not hold.
    pub warnings: Vec<String>,
}

/// A source file that could not be read, parsed or written.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub source: PathBuf,
    pub error: String,
}

/// Outcome of one `skillport convert` run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConvertReport {
    /// Items converted, written or (in a dry run) planned
    pub converted: Vec<ConvertedItem>,
    /// Items converted but not written
    pub skipped: Vec<SkipReason>,
    pub failed: Vec<Failure>,
    pub dry_run: bool,
}

impl ConvertReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Number of files written, or that would be written in a dry run.
    pub fn written(&self) -> usize {
        self.converted.len() - self.skipped.len().min(self.converted.len())
    }

    pub fn total_warnings(&self) -> usize {
        self.converted.iter().map(|item| item.warnings.len()).sum()
    }

    /// True when at least one file was attempted and none succeeded.
    pub fn all_failed(&self) -> bool {
        !self.failed.is_empty() && self.converted.is_empty()
    }

    /// Generates a formatted summary for display.
    pub fn format_summary(&self, target: &str) -> String {
        let mut out = String::new();
        let heading = if self.dry_run {
            "Dry Run"
        } else {
            "Convert Complete"
        };
        out.push_str(&format!("{heading}: → {target}\n"));
        let verb = if self.dry_run { "would write" } else { "written" };
        out.push_str(&format!("  Files:    {} {verb}\n", self.written()));
        out.push_str(&format!("  Skipped:  {}\n", self.skipped.len()));
        out.push_str(&format!("  Failed:   {}\n", self.failed.len()));
        out.push_str(&format!("  Warnings: {}\n", self.total_warnings()));
        for reason in &self.skipped {
            out.push_str(&format!("  - {}", reason.description()));
            if let Some(guidance) = reason.guidance() {
                out.push_str(&format!(" ({guidance})"));
            }
            out.push('\n');
        }
        for failure in &self.failed {
            out.push_str(&format!(
                "  ! {}: {}\n",
                failure.source.display(),
                failure.error
            ));
        }
        out
    }
}
