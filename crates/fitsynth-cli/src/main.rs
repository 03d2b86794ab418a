use anyhow::Result;
use tracing::info;

use fitsynth_cli::config::Config;

fn main() -> Result<()> {
    // Structured JSON logs on stderr; stdout carries only the run summary.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitsynth=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cfg = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let summary = fitsynth_cli::app::run(&cfg)?;
    info!(
        users = summary.dataset.users,
        out_dir = %summary.output_dir,
        archive = %summary.archive,
        "dataset generated"
    );
    println!("{}", summary.to_json()?);

    Ok(())
}
