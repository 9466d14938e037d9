//! Error types for the conversion core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by parsing and serialization.
///
/// Fields that cannot be represented in a target dialect are never errors;
/// they surface as warning strings on the conversion result instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The YAML between the `---` delimiters could not be parsed.
    #[error("invalid YAML frontmatter: {message}")]
    Frontmatter { message: String },

    /// An MCP config was not valid JSON.
    #[error("invalid MCP config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Front matter could not be rendered back to YAML.
    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The dialect name is not one of the known values.
    #[error("unsupported dialect '{0}' (expected claude, opencode, copilot or cursor)")]
    UnsupportedDialect(String),

    /// The path matches no known artifact or config pattern.
    #[error("cannot determine artifact kind or dialect for {}", path.display())]
    Undetected { path: PathBuf },
}

impl Error {
    pub(crate) fn frontmatter(err: impl std::fmt::Display) -> Self {
        Self::Frontmatter {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
