mod platform;

use std::path::PathBuf;

use clap::Parser;
use inventory_logging::inventory_error;

use platform::config::{self, DEFAULT_CONFIG_FILE};
use platform::logging::{self, LogDestination};

/// Terminal client for the inventory REST service.
#[derive(Debug, Parser)]
#[command(name = "inventory", version, about)]
struct Cli {
    /// RON config file; a missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Backend base URL, overriding the config file.
    #[arg(long)]
    base_url: Option<String>,

    /// Where log output goes, overriding the config file.
    #[arg(long, value_enum)]
    log: Option<LogDestination>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut app_config = config::load(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        app_config.base_url = base_url;
    }
    if let Some(destination) = cli.log {
        app_config.log = destination;
    }

    logging::initialize(app_config.log);
    let result = platform::run_app(app_config);
    if let Err(err) = &result {
        inventory_error!("Inventory client stopped with an error: {err:#}");
    }
    result
}
