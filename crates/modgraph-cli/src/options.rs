//! Command-line options shared by the `modgraph` binary and its tests.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser};

use modgraph_core::CategorySet;
use modgraph_dot::GraphOptions;
use modgraph_error::Result;

use crate::VizOptions;
use crate::render::{GraphvizRenderer, RenderFormat};

pub const DEFAULT_DOT_FILE: &str = "build/subproject-dependencies.dot";
pub const DEFAULT_IMAGE_FILE: &str = "build/subproject-dependencies.png";

/// Options selecting what goes into the graph.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Categories to include (repeatable). Defaults to every category
    /// except INTERNAL.
    #[arg(
        short = 'c',
        long = "category",
        value_name = "CATEGORY",
        num_args = 1..,
        action = clap::ArgAction::Append
    )]
    pub categories: Vec<String>,

    /// Also draw one edge per pair of categories that depend on each other
    #[arg(long = "cross-category")]
    pub cross_category: bool,
}

impl GraphArgs {
    pub fn to_graph_options(&self) -> Result<GraphOptions> {
        let categories = if self.categories.is_empty() {
            CategorySet::default()
        } else {
            CategorySet::parse_names(&self.categories)?
        };
        Ok(GraphOptions {
            categories,
            include_cross_category: self.cross_category,
        })
    }
}

/// Options controlling where output goes and how it is rendered.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Path of the generated DOT document
    #[arg(long = "dot-file", value_name = "FILE", default_value = DEFAULT_DOT_FILE)]
    pub dot_file: PathBuf,

    /// Path of the rendered image
    #[arg(long = "image-file", value_name = "FILE", default_value = DEFAULT_IMAGE_FILE)]
    pub image_file: PathBuf,

    /// Image format passed to the renderer
    #[arg(long, value_enum, default_value_t = RenderFormat::Png)]
    pub format: RenderFormat,

    /// Graphviz-compatible executable used for rendering
    #[arg(long, value_name = "PROGRAM", default_value = "dot")]
    pub renderer: PathBuf,

    /// Kill the renderer after this many seconds
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Write the DOT document only, skip rendering
    #[arg(long = "dot-only")]
    pub dot_only: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            dot_file: PathBuf::from(DEFAULT_DOT_FILE),
            image_file: PathBuf::from(DEFAULT_IMAGE_FILE),
            format: RenderFormat::default(),
            renderer: PathBuf::from("dot"),
            timeout_secs: None,
            dot_only: false,
        }
    }
}

impl RenderArgs {
    pub fn renderer(&self) -> GraphvizRenderer {
        GraphvizRenderer::new(self.renderer.clone())
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
    }
}

/// Top-level arguments of the `modgraph` binary.
#[derive(Parser, Debug)]
#[command(
    name = "modgraph",
    about = "modgraph: render the module structure of a build as a dependency graph",
    version
)]
pub struct Cli {
    /// Build manifest describing modules and their dependencies (TOML or JSON)
    #[arg(short = 'm', long = "manifest", value_name = "FILE")]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

impl Cli {
    pub fn to_viz_options(&self) -> Result<VizOptions> {
        Ok(VizOptions {
            manifest: self.manifest.clone(),
            graph: self.graph.to_graph_options()?,
            dot_file: self.render.dot_file.clone(),
            image_file: self.render.image_file.clone(),
            format: self.render.format,
            dot_only: self.render.dot_only,
        })
    }

    pub fn renderer(&self) -> GraphvizRenderer {
        self.render.renderer()
    }
}
