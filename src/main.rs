use clap::Parser;
use tracing::{error, info};

use offerlens::adapter::inbound::cli::command::Cli;
use offerlens::adapter::inbound::cli::output::{self, OutputConfig};
use offerlens::adapter::inbound::cli::{execute, load_config};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!(database = %config.database, "offerlens starting");

    if let Err(e) = execute(&cli, &config).await {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
