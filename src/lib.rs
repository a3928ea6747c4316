//! Shared library for `admission-sim`
//! Contains the admission scoring and course ranking engines used by the CLI

pub mod core;
pub mod logger;

/// Returns the current version of the `admission-sim` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
