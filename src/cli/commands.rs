use clap::Parser;
use std::path::PathBuf;

/// Main CLI structure for speedlog
/// Running without arguments performs one speed test and saves it to db/speeds.db
#[derive(Parser, Debug)]
#[command(version)] // Automatically uses version from Cargo.toml
#[command(about = "Run one internet speed test and append the result to a local SQLite database")]
#[command(long_about = "Measures latency, download and upload throughput once, stores the result as a \
new row in the speedtests table and prints the saved record as JSON. Schedule it with cron or a \
systemd timer to build up a history.\n\n\
Examples:\n  \
speedlog                              # One run, saved to db/speeds.db\n  \
speedlog --database /srv/speeds.db    # Save somewhere else\n  \
speedlog --config speedlog.toml       # Load settings from a file")]
pub struct Cli {
    /// Settings file (TOML, YAML or JSON); built-in defaults are used otherwise
    #[arg(short, long, value_name = "FILE", help = "Load settings from this file")]
    pub config: Option<PathBuf>,

    /// Overrides the database location from the settings
    #[arg(short, long, value_name = "PATH", help = "SQLite database file to append to")]
    pub database: Option<PathBuf>,
}
