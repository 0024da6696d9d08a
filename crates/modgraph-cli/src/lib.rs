//! modgraph command-line interface.

pub mod options;
pub mod pipeline;
pub mod render;

use std::path::PathBuf;

use modgraph_dot::GraphOptions;

pub use options::{Cli, DEFAULT_DOT_FILE, DEFAULT_IMAGE_FILE, GraphArgs, RenderArgs};
pub use pipeline::{RunReport, generate, process_manifest, write_document};
pub use render::{GraphvizRenderer, RenderFormat, RenderRequest, Renderer};

/// Options for running modgraph.
#[derive(Debug, Clone)]
pub struct VizOptions {
    pub manifest: PathBuf,
    pub graph: GraphOptions,
    pub dot_file: PathBuf,
    pub image_file: PathBuf,
    pub format: RenderFormat,
    pub dot_only: bool,
}

impl VizOptions {
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            graph: GraphOptions::default(),
            dot_file: PathBuf::from(DEFAULT_DOT_FILE),
            image_file: PathBuf::from(DEFAULT_IMAGE_FILE),
            format: RenderFormat::default(),
            dot_only: false,
        }
    }
}

/// Main entry point
pub fn run_main(opts: &VizOptions, renderer: &dyn Renderer) -> modgraph_error::Result<RunReport> {
    process_manifest(opts, renderer)
}
