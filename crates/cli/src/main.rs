mod input;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use torrential_core::config::LoggingConfig;
use torrential_core::{
    load_config, validate_config, AppContext, DadJokeClient, ExitSequence, JokeSource,
    LibrqbitClient, MovieCatalog, Orchestrator, TransferClient, YtsClient,
};

use input::StdinPrompter;
use terminal::{print_banner, TerminalConsole};

/// Config file picked up from the working directory when present.
const DEFAULT_CONFIG_FILE: &str = "torrential.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
    // The engine session and the stdin thread never finish on their own
    std::process::exit(0);
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// `TORRENTIAL_CONFIG`, else `torrential.toml` if it exists.
fn config_path() -> Option<PathBuf> {
    match std::env::var("TORRENTIAL_CONFIG") {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}

async fn run() -> Result<()> {
    let config_path = config_path();
    let config = load_config(config_path.as_deref());

    // Logging comes up before config errors are reported
    let level = match &config {
        Ok(config) => config.logging.level.clone(),
        Err(_) => LoggingConfig::default().level,
    };
    init_tracing(&level);

    let config = config.with_context(|| match &config_path {
        Some(path) => format!("Failed to load config from {:?}", path),
        None => "Failed to load config".to_string(),
    })?;
    validate_config(&config).context("Configuration validation failed")?;

    info!(path = ?config_path, "Configuration loaded");

    let catalog: Arc<dyn MovieCatalog> = Arc::new(
        YtsClient::new(config.catalog.clone()).context("Failed to create catalog client")?,
    );
    info!(url = %config.catalog.url, "Catalog client initialized");

    let transfers: Arc<dyn TransferClient> = Arc::new(
        LibrqbitClient::new(&config.download)
            .await
            .context("Failed to start torrent engine")?,
    );
    info!(path = %config.download.path.display(), "Torrent engine initialized");

    let jokes: Option<Arc<dyn JokeSource>> = if config.farewell.enabled {
        Some(Arc::new(
            DadJokeClient::new(&config.farewell).context("Failed to create joke client")?,
        ))
    } else {
        None
    };

    let ctx = AppContext::new(config, catalog, transfers, ExitSequence::new(jokes));

    print_banner();

    let mut prompter = StdinPrompter::spawn();
    let mut console = TerminalConsole::new();

    let end = Orchestrator::new(&ctx)
        .run_session(&mut prompter, &mut console)
        .await;
    info!(?end, "Session finished");

    Ok(())
}
