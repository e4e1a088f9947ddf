use anyhow::{Context, Result};
use clap::Parser;
use speedlog::cli::Cli;
use speedlog::collectors::{CloudflareBackend, SpeedtestCollector};
use speedlog::config::Settings;
use speedlog::runner::run_once;
use speedlog::storage::MeasurementStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(database) = cli.database {
        settings.database_path = database;
    }

    let store = MeasurementStore::new(&settings.database_path);
    let backend = CloudflareBackend::new(settings.backend).context("Failed to create HTTP client")?;
    let mut collector = SpeedtestCollector::new(backend);

    let saved = run_once(&store, &mut collector).await?;

    println!("Saved result:");
    println!("{}", serde_json::to_string_pretty(&saved)?);

    Ok(())
}
