//! Core module: loading, graph construction, and rendering

pub mod builder;
pub mod loader;
pub mod models;
pub mod render;

pub use builder::{build_graph, GraphBuilder, GraphError, IdPolicy};
pub use loader::{load_document, LoadError};
pub use render::{renderer_for, GraphRenderer, OutputFormat, RenderError, RenderOptions};
