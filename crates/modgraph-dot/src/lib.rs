//! DOT document generation for build-structure graphs.
//!
//! Modules are grouped into one subgraph cluster per category and filled
//! with the category's palette colour. Dependency edges are coloured by
//! relation kind.
//!
//! # Module Structure
//!
//! - [`builder`]: node and edge extraction from a [`BuildModel`]
//! - [`dot`]: escaping, statement writers and the document wrapper

pub mod builder;
pub mod dot;

use tracing::info;

use modgraph_core::BuildModel;

pub use builder::{
    ALERT_COLOR, CategoryEdge, GraphContent, GraphOptions, HIGHLIGHT_COLOR, NEUTRAL_COLOR,
    build_graph, edge_color,
};
pub use dot::{DotBuilder, wrap_document};

/// Build the complete DOT document for `model`.
pub fn render_document(model: &BuildModel, options: &GraphOptions) -> String {
    let content = build_graph(model, options);
    let document = wrap_document(&content.body(options.include_cross_category));
    info!(
        nodes = content.node_count,
        edges = content.edge_count,
        bytes = document.len(),
        "dot document generated"
    );
    document
}
