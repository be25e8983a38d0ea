//! Shared module for functionality used by the library and the CLI

pub mod config;
pub mod logger;

/// Returns the current version of the `cs-amc-graph` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
