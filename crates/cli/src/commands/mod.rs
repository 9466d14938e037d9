//! Subcommand implementations.

pub mod convert;
