//! Core pipeline: load manifest → build document → write → render.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use modgraph_core::{BuildModel, load_manifest};
use modgraph_dot::render_document;
use modgraph_error::{Error, Result};

use crate::VizOptions;
use crate::render::{RenderRequest, Renderer};

/// Files produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub dot_file: PathBuf,
    /// `None` when rendering was skipped.
    pub image_file: Option<PathBuf>,
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let wrap = |e: io::Error| {
        Error::io_at(e, path.display().to_string()).with_operation("pipeline::write_document")
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, contents).map_err(wrap)?;
    debug!(path = %path.display(), bytes = contents.len(), "document written");
    Ok(())
}

/// Remove an image left over from an earlier run so a failed render never
/// leaves an outdated file behind.
fn clear_stale_image(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed previous image");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io_at(e, path.display().to_string())
            .with_operation("pipeline::clear_stale_image")),
    }
}

/// Generate the document for `model`, write it, and render it.
///
/// The document is written before the renderer runs, so it survives a
/// render failure. Rendering onto the document's own path is rejected before
/// anything is written.
pub fn generate(
    model: &BuildModel,
    opts: &VizOptions,
    renderer: &dyn Renderer,
) -> Result<RunReport> {
    if !opts.dot_only && opts.dot_file == opts.image_file {
        return Err(Error::invalid_argument(
            "the dot file and the image file must be different paths",
        )
        .with_operation("pipeline::generate")
        .with_context("path", opts.dot_file.display().to_string()));
    }

    let document = render_document(model, &opts.graph);
    write_document(&opts.dot_file, &document)?;
    info!(path = %opts.dot_file.display(), "dot file written");

    if opts.dot_only {
        return Ok(RunReport {
            dot_file: opts.dot_file.clone(),
            image_file: None,
        });
    }

    clear_stale_image(&opts.image_file)?;
    if let Some(parent) = opts.image_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::io_at(e, parent.display().to_string()).with_operation("pipeline::generate")
        })?;
    }

    let render_start = Instant::now();
    renderer.render(&RenderRequest {
        format: opts.format,
        input: &opts.dot_file,
        output: &opts.image_file,
    })?;
    info!(
        "Rendering: {:.2}s ({})",
        render_start.elapsed().as_secs_f64(),
        opts.image_file.display()
    );

    Ok(RunReport {
        dot_file: opts.dot_file.clone(),
        image_file: Some(opts.image_file.clone()),
    })
}

/// Load the manifest named in `opts` and run [`generate`] on it.
pub fn process_manifest(opts: &VizOptions, renderer: &dyn Renderer) -> Result<RunReport> {
    let model = load_manifest(&opts.manifest)?;
    generate(&model, opts, renderer)
}
