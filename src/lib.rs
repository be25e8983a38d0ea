//! Shared library for `cs-amc-graph`
//! Turns certification-specification JSON into a directed graph and renders it.

pub mod core;
pub mod shared;

pub use shared::*;
