//! Command-line entry point for `skillport`.
//!
//! All behavior lives in the library half of this crate so integration
//! tests and other binaries can drive it.

fn main() -> anyhow::Result<()> {
    skillport::run()
}
