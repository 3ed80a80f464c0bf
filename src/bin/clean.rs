use anyhow::Result;
use rharvest::{init_tracing_once, run_cleaning, Settings};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "config.yaml";

fn main() -> Result<()> {
    init_tracing_once();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let settings = Settings::load(&config_path)?;

    let report = run_cleaning(&settings)?;
    tracing::info!(
        files = report.data.len(),
        rows_loaded = report.summary.post_total,
        removed_short = report.summary.post_rmd_short,
        removed_author = report.summary.post_rmd_author,
        "cleaning run finished"
    );
    Ok(())
}
