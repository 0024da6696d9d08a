use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use modgraph::{
    GraphvizRenderer, RenderFormat, RenderRequest, Renderer, VizOptions, generate, run_main,
};
use modgraph_core::{BuildModel, Category, Module, RelationKind};
use modgraph_error::{Error, ErrorKind, Result};
use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

/// Records every request and optionally fails instead of producing an image.
#[derive(Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<(RenderFormat, PathBuf, PathBuf)>>,
    fail: bool,
}

impl RecordingRenderer {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<()> {
        self.calls.borrow_mut().push((
            request.format,
            request.input.to_path_buf(),
            request.output.to_path_buf(),
        ));
        if self.fail {
            return Err(Error::render_failed("recording renderer told to fail"));
        }
        fs::write(request.output, b"image")?;
        Ok(())
    }
}

fn sample_model() -> BuildModel {
    BuildModel::new(vec![
        Module::new("launcher")
            .with_category(Category::Startup)
            .depends_on(RelationKind::Runtime, "core"),
        Module::new("core")
            .with_category(Category::Core)
            .depends_on(RelationKind::Implementation, "internal-testing"),
        Module::new("internal-testing"),
    ])
    .unwrap()
}

fn options_in(dir: &TempDir) -> VizOptions {
    let mut opts = VizOptions::new(dir.path().join("modules.toml"));
    opts.dot_file = dir.path().join("build").join("graph.dot");
    opts.image_file = dir.path().join("build").join("graph.png");
    opts
}

#[test]
fn writes_document_then_renders_it() {
    let dir = tempdir().expect("tempdir");
    let opts = options_in(&dir);
    let renderer = RecordingRenderer::default();

    let report = generate(&sample_model(), &opts, &renderer).expect("generate");

    assert_eq!(report.dot_file, opts.dot_file);
    assert_eq!(report.image_file.as_deref(), Some(opts.image_file.as_path()));
    assert_eq!(
        renderer.calls.borrow().as_slice(),
        &[(RenderFormat::Png, opts.dot_file.clone(), opts.image_file.clone())]
    );

    let document = fs::read_to_string(&opts.dot_file).expect("read dot");
    assert!(document.starts_with("digraph build_structure {"));
    assert!(document.contains("\"launcher\" -> \"core\" [color=\"firebrick1\"]"));
    assert!(!document.contains("internal-testing"));
    assert!(opts.image_file.exists());
}

#[test]
fn dot_only_skips_renderer() {
    let dir = tempdir().expect("tempdir");
    let mut opts = options_in(&dir);
    opts.dot_only = true;
    let renderer = RecordingRenderer::default();

    let report = generate(&sample_model(), &opts, &renderer).expect("generate");

    assert!(report.image_file.is_none());
    assert!(renderer.calls.borrow().is_empty());
    assert!(opts.dot_file.exists());
}

#[test]
fn render_failure_is_reported_and_stale_image_removed() {
    let dir = tempdir().expect("tempdir");
    let opts = options_in(&dir);
    fs::create_dir_all(opts.image_file.parent().unwrap()).unwrap();
    fs::write(&opts.image_file, b"old image").unwrap();

    let err = generate(&sample_model(), &opts, &RecordingRenderer::failing()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RenderFailed);
    assert!(opts.dot_file.exists());
    assert!(!opts.image_file.exists());
}

#[test]
fn missing_renderer_executable_fails_after_writing_document() {
    let dir = tempdir().expect("tempdir");
    let opts = options_in(&dir);
    let renderer = GraphvizRenderer::new(dir.path().join("no-such-dot"));

    let err = generate(&sample_model(), &opts, &renderer).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RendererNotFound);
    assert!(opts.dot_file.exists());
    assert!(!opts.image_file.exists());
}

#[test]
fn unwritable_document_path_aborts_before_rendering() {
    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"a file, not a directory").unwrap();

    let mut opts = options_in(&dir);
    opts.dot_file = blocker.join("graph.dot");
    let renderer = RecordingRenderer::default();

    let err = generate(&sample_model(), &opts, &renderer).unwrap_err();

    assert_eq!(err.operation(), "pipeline::write_document");
    assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn image_path_equal_to_document_path_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let mut opts = options_in(&dir);
    opts.image_file = opts.dot_file.clone();
    let renderer = RecordingRenderer::default();

    let err = generate(&sample_model(), &opts, &renderer).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.operation(), "pipeline::generate");
    assert!(renderer.calls.borrow().is_empty());
    assert!(!opts.dot_file.exists());

    // only the document is produced in dot-only mode, so the paths may match
    opts.dot_only = true;
    generate(&sample_model(), &opts, &renderer).expect("dot only");
    assert!(opts.dot_file.exists());
}

#[test]
fn run_main_reads_manifest() {
    let dir = tempdir().expect("tempdir");
    let opts = options_in(&dir);
    fs::write(
        &opts.manifest,
        r#"
[[module]]
name = "worker-processes"
category = "WORKER"

[[module.dependency]]
kind = "compile"
project = "core"

[[module]]
name = "core"
category = "CORE"
"#,
    )
    .unwrap();

    let renderer = RecordingRenderer::default();
    run_main(&opts, &renderer).expect("run");

    let document = fs::read_to_string(&opts.dot_file).unwrap();
    assert!(document.contains("\"worker-processes\" -> \"core\" [color=\"deeppink\"]"));
}

#[test]
fn run_main_surfaces_manifest_errors() {
    let dir = tempdir().expect("tempdir");
    let opts = options_in(&dir);

    let err = run_main(&opts, &RecordingRenderer::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FileNotFound);
    assert!(!opts.dot_file.exists());
}

#[cfg(unix)]
mod process {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::PermissionsExt;
    use std::time::{Duration, Instant};

    /// Write an executable shell script standing in for `dot`.
    /// Arguments arrive as `-T<format> <input> -o <output>`.
    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn successful_process_produces_image() {
        let dir = tempdir().expect("tempdir");
        let opts = options_in(&dir);
        let program = script(dir.path(), "fake-dot", r#"cp "$2" "$4""#);

        generate(&sample_model(), &opts, &GraphvizRenderer::new(program)).expect("render");

        assert_eq!(
            fs::read_to_string(&opts.image_file).unwrap(),
            fs::read_to_string(&opts.dot_file).unwrap()
        );
    }

    #[test]
    fn non_zero_exit_carries_stderr() {
        let dir = tempdir().expect("tempdir");
        let opts = options_in(&dir);
        let program = script(dir.path(), "broken-dot", "echo 'syntax error in line 3' >&2\nexit 2");

        let err = generate(&sample_model(), &opts, &GraphvizRenderer::new(program)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RenderFailed);
        assert_eq!(err.context_value("exit_code"), Some("2"));
        assert_eq!(err.context_value("stderr"), Some("syntax error in line 3"));
    }

    #[test]
    fn hung_renderer_is_killed_after_timeout() {
        let dir = tempdir().expect("tempdir");
        let opts = options_in(&dir);
        let program = script(dir.path(), "slow-dot", "exec sleep 30");
        let renderer =
            GraphvizRenderer::new(program).with_timeout(Some(Duration::from_millis(200)));

        let start = Instant::now();
        let err = generate(&sample_model(), &opts, &renderer).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(err.is_retryable());
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn timeout_does_not_wait_for_orphaned_children() {
        let dir = tempdir().expect("tempdir");
        let opts = options_in(&dir);
        // no exec: the shell is killed but its `sleep` keeps stderr open
        let program = script(dir.path(), "forking-dot", "sleep 6\ntrue");
        let renderer =
            GraphvizRenderer::new(program).with_timeout(Some(Duration::from_millis(200)));

        let start = Instant::now();
        let err = generate(&sample_model(), &opts, &renderer).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(start.elapsed() < Duration::from_secs(3));
    }
}
