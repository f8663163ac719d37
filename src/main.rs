use clap::Parser;

use signal_relay::adapter::inbound::cli::command::{Cli, Commands};
use signal_relay::adapter::inbound::cli::output::{self, OutputConfig};
use signal_relay::adapter::inbound::cli::{check, run};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let config_path = cli.config.as_deref();
    let result = match cli.command.unwrap_or_default() {
        Commands::Run => run::execute(config_path).await,
        Commands::Check => check::execute(config_path),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
