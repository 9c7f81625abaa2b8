mod game_service;
mod server_config;
mod web_server;

use std::path::PathBuf;

use clap::Parser;
use common::config::{ConfigManager, FileContentConfigProvider, Validate};
use common::{log, logger};

use game_service::GameService;
use server_config::{DEFAULT_CONFIG_PATH, ServerConfig};
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    /// YAML config file; built-in defaults are used when it does not exist.
    /// A relative `static_files_path` inside it is resolved against its directory
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Overrides `listen_address` from the config
    #[arg(long)]
    listen: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Log search statistics for every bot move
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager: ConfigManager<FileContentConfigProvider, ServerConfig> =
        ConfigManager::from_yaml_file(&args.config);
    let (mut config, source) = config_manager.load()?;
    log!("Loaded config from {}", source);
    if let Some(config_dir) = args.config.parent() {
        config.resolve_paths(config_dir);
    }

    if let Some(listen) = args.listen {
        config.listen_address = listen;
        config.validate()?;
    }

    let addr = config.socket_addr()?;
    let game_service = GameService::new(config.search);
    log!("Bot scoring mode: {:?}", config.search.scoring);

    run_web_server(game_service, addr, &config.static_files_path).await?;

    log!("Server shut down gracefully");

    Ok(())
}
