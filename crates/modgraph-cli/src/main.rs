use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use modgraph::{Cli, run_main};

pub fn run(args: Cli) -> anyhow::Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = args.to_viz_options()?;
    let renderer = args.renderer();

    let report = run_main(&opts, &renderer).map_err(|e| {
        tracing::error!(error = %e, "execution failed");
        e
    });
    let report = report.with_context(|| format!("failed to graph {}", opts.manifest.display()))?;

    eprintln!("Wrote {}", report.dot_file.display());
    if let Some(image) = &report.image_file {
        eprintln!("Wrote {}", image.display());
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    run(args)
}
