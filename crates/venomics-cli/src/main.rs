use clap::Parser;
use venomics_core::storage::config::Config;
use venomics_core::utils::logging;

mod cli;

use cli::dispatcher::Dispatcher;
use cli::main_types::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = cli.config_dir.as_deref().map(Config::file_in);

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(path) = &config_path {
        log::debug!("Using config file {}", path.display());
    }

    let dispatcher = Dispatcher::new(config, config_path, cli.verbose, cli.url, cli.api_key);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} Error: {}", e.severity().emoji(), e);
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("💡 {}", hint);
        }
        std::process::exit(1);
    }
}
