//! Output format implementations
//!
//! Provides renderers for the supported formats: HTML, DOT, and JSON.

pub mod dot;
pub mod html;
pub mod json;

pub use dot::DotRenderer;
pub use html::HtmlRenderer;
pub use json::JsonRenderer;

use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Interactive HTML page with a vis-network graph
    #[default]
    Html,
    /// Graphviz DOT digraph
    Dot,
    /// JSON node-link document
    Json,
}

impl OutputFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Dot => "dot",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "dot" | "gv" | "graphviz" => Ok(Self::Dot),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Dot => write!(f, "dot"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::from_str("HTML").unwrap(), OutputFormat::Html);
        assert_eq!(OutputFormat::from_str("htm").unwrap(), OutputFormat::Html);
        assert_eq!(OutputFormat::from_str("gv").unwrap(), OutputFormat::Dot);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("pdf").is_err());
    }

    #[test]
    fn test_format_extension_and_display() {
        assert_eq!(OutputFormat::Dot.extension(), "dot");
        assert_eq!(OutputFormat::Html.to_string(), "html");
        assert_eq!(OutputFormat::default(), OutputFormat::Html);
    }
}
