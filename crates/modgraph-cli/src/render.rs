//! Rasterizing DOT documents with an external renderer.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use strum_macros::{Display, EnumString, IntoStaticStr};
use tracing::{debug, info, warn};

use modgraph_error::{Error, Result};

/// How often a renderer with a deadline is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Output formats understood by Graphviz `-T`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, EnumString, IntoStaticStr, Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    Jpg,
    Gif,
}

impl RenderFormat {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// One rendering job: the document to read and the image to produce.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub format: RenderFormat,
    pub input: &'a Path,
    pub output: &'a Path,
}

/// Turns a DOT document on disk into an image.
///
/// The image is only guaranteed to exist when `render` returns `Ok`.
pub trait Renderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<()>;
}

/// Runs a Graphviz-compatible executable as
/// `<program> -T<format> <input> -o <output>`.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl GraphvizRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Kill the renderer if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Wait for the child; `None` means the deadline passed and it was killed.
    fn wait(&self, child: &mut Child) -> Result<Option<ExitStatus>> {
        let Some(timeout) = self.timeout else {
            return Ok(Some(child.wait()?));
        };

        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
        }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<()> {
        let program = self.program.display().to_string();
        let format_flag = format!("-T{}", request.format);

        let mut cmd = Command::new(&self.program);
        cmd.arg(&format_flag)
            .arg(request.input)
            .arg("-o")
            .arg(request.output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        debug!(
            program = %program,
            format = request.format.as_str(),
            input = %request.input.display(),
            output = %request.output.display(),
            "spawning renderer"
        );

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|e| {
            Error::renderer_not_found(program.clone())
                .with_operation("render::graphviz")
                .set_source(e)
        })?;

        // stderr is drained on its own thread; a full pipe would stall the child.
        let stderr_handle = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf);
                buf
            })
        });

        let status = self
            .wait(&mut child)
            .map_err(|e| e.with_operation("render::graphviz"))?;
        // After a kill, a grandchild may still hold the pipe open; the reader
        // is detached instead of joined so the timeout stays bounded.
        let stderr = match (status, stderr_handle) {
            (Some(_), Some(handle)) => handle.join().unwrap_or_default(),
            _ => String::new(),
        };
        let stderr = stderr.trim();

        match status {
            Some(status) if status.success() => {
                info!(
                    program = %program,
                    output = %request.output.display(),
                    secs = start.elapsed().as_secs_f64(),
                    "image rendered"
                );
                Ok(())
            }
            Some(status) => {
                warn!(program = %program, %status, "renderer failed");
                let mut err = Error::render_failed(format!("'{program}' exited with {status}"))
                    .with_operation("render::graphviz")
                    .with_context("program", program.clone())
                    .with_context("input", request.input.display().to_string());
                if let Some(code) = status.code() {
                    err = err.with_context("exit_code", code.to_string());
                }
                if !stderr.is_empty() {
                    err = err.with_context("stderr", stderr);
                }
                Err(err)
            }
            None => {
                let limit = self.timeout.unwrap_or_default();
                warn!(
                    program = %program,
                    timeout_secs = limit.as_secs_f64(),
                    "renderer timed out"
                );
                Err(Error::timeout(format!(
                    "'{program}' did not finish within {:.1}s",
                    limit.as_secs_f64()
                ))
                .with_operation("render::graphviz")
                .with_context("program", program.clone()))
            }
        }
    }
}
