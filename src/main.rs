use anova_sim::experiment::{self, ExperimentConfig};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only the report.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let experiment = experiment::run(&ExperimentConfig::default())?;
    print!("{}", experiment.report());

    Ok(())
}
