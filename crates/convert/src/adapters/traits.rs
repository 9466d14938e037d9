//! Trait definitions implemented by every per-dialect adapter.

use crate::error::Result;
use std::collections::BTreeMap;

/// Front-matter keys an adapter does not define, in sorted order.
pub type Extra = BTreeMap<String, serde_yaml::Value>;

/// Common interface of a parsed artifact file in one dialect.
pub trait ArtifactFormat {
    /// Parses dialect-specific text into the adapter.
    fn parse(content: &str) -> Result<Self>
    where
        Self: Sized;

    /// Artifact name, derived when the dialect has no explicit name slot.
    fn name(&self) -> String;

    /// Whether the file itself names the artifact, as opposed to a name
    /// derived from its content or a fixed fallback.
    fn has_explicit_name(&self) -> bool {
        !self.name().is_empty()
    }

    fn description(&self) -> &str;

    /// Markdown body, verbatim.
    fn body(&self) -> &str;

    /// Renders the adapter back to dialect-specific text.
    fn serialize(&self) -> Result<String>;

    /// Unrecognized front-matter keys.
    fn extra(&self) -> &Extra;

    fn extra_mut(&mut self) -> &mut Extra;

    /// Drops the explicit name so the written file carries none.
    fn clear_name(&mut self);
}

/// Projection to and from a canonical record `C`.
///
/// Cursor rules implement this for both skills and commands, since Cursor
/// has no separate command format.
pub trait CanonicalForm<C>: Sized {
    fn to_canonical(&self) -> C;

    fn from_canonical(canonical: &C) -> Self;
}
