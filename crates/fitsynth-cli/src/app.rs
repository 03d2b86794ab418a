use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use fitsynth_generator::Dataset;

use crate::archive::write_archive;
use crate::config::Config;
use crate::export::write_dataset;
use crate::summary::RunSummary;

/// One full run: generate, write the four CSVs, bundle them.
///
/// Any failure aborts the run; files already written are left as they are.
pub fn run(cfg: &Config) -> Result<RunSummary> {
    info!(
        seed = cfg.generator.seed,
        start = %cfg.generator.start_date,
        end = %cfg.generator.end_date,
        "generating dataset"
    );
    let dataset = Dataset::generate_seeded(&cfg.generator).context("dataset generation failed")?;

    let files = write_dataset(&dataset, Path::new(&cfg.out_dir))?;
    write_archive(Path::new(&cfg.archive_path), &files)?;

    Ok(RunSummary {
        dataset: dataset.summary(),
        output_dir: cfg.out_dir.clone(),
        archive: cfg.archive_path.clone(),
        seed: cfg.generator.seed,
    })
}
