//! amlweb main entry point

use amlweb_api::{start_server, AppState};
use amlweb_config::{Config, ConfigError};
use amlweb_core::HttpTransactionSource;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "amlweb")]
#[command(author = "amlweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Transaction dashboard for the anti-money-laundering admin", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the transaction source URL
    #[arg(long)]
    source_url: Option<String>,

    /// Override the server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (mut config, missing_config) = match Config::load(&args.config) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => anyhow::bail!("{}", e.to_details()),
    };
    if let Some(url) = args.source_url {
        config.source.url = url;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if missing_config {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!("Config loaded: source={}, bind={}", config.source.url, config.bind_address());

    let source = HttpTransactionSource::from_config(&config).context("Failed to create transaction source")?;

    let rt = Runtime::new()?;
    rt.block_on(async {
        let state = AppState::mount(config, Arc::new(source));
        start_server(state).await
    })
    .context("Server error")?;

    Ok(())
}
