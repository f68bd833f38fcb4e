//! jpsvis2sqlite — converts legacy jpsvis trajectory text files into the
//! SQLite format read by the JuPedSim visualizer.
//!
//! ```text
//! jpsvis2sqlite 'runs/**/*.txt' --fps 16
//! jpsvis2sqlite traj.txt -o traj.sqlite --gf area.wkt
//! ```

mod cli;


use std::path::Path;

use anyhow::{Context, bail};
use jv_convert::convert_batch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let base = std::env::current_dir().context("cannot determine the working directory")?;
    run(&cli, &base)
}

/// Convert everything `cli` selects, resolving relative patterns against `base`.
fn run(cli: &Cli, base: &Path) -> anyhow::Result<()> {
    let options = cli.convert_options()?;
    let report = convert_batch(base, &cli.file_pattern, &options)?;

    info!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        "finished"
    );
    if !report.is_success() {
        bail!("{} of {} files failed to convert", report.failed.len(), report.attempted());
    }
    Ok(())
}
