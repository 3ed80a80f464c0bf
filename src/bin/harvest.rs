use anyhow::Result;
use rharvest::{init_tracing_once, run_harvest, Settings};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "config.yaml";

fn main() -> Result<()> {
    init_tracing_once();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let settings = Settings::load(&config_path)?;

    let report = run_harvest(&settings)?;
    let ok = report.iter().filter(|s| s.status).count();
    tracing::info!(
        succeeded = ok,
        attempted = report.len(),
        report = %settings.report.output_file.display(),
        "harvest run finished"
    );
    Ok(())
}
