//! Document loading

pub mod json_parser;

pub use json_parser::{load_document, LoadError};
