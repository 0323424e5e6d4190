use std::io::stdout;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use vitrine::application::{CatalogAggregator, LoadFeaturedProductsUseCase, ResultCache};
use vitrine::domain::ports::KeyValueStorePort;
use vitrine::infrastructure::{
    AppConfig, BrowserNavigator, CliArgs, FileKeyValueStore, MemoryKeyValueStore, StorageManager,
    StorefrontApiClient, SystemClock,
};
use vitrine::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: CliArgs) -> Result<AppConfig> {
    let mut config = match StorageManager::new() {
        Ok(storage) => storage.load_config(args.config.as_deref())?,
        Err(_) => AppConfig::default(),
    };
    config.apply_env();
    config.merge_with_args(args);
    Ok(config)
}

fn key_value_store(config: &AppConfig) -> Arc<dyn KeyValueStorePort> {
    if let Some(dir) = config.effective_cache_dir() {
        Arc::new(FileKeyValueStore::in_dir(&dir))
    } else {
        warn!("No cache directory available, caching in memory only");
        Arc::new(MemoryKeyValueStore::new())
    }
}

fn create_app() -> Result<(App, bool)> {
    let config = load_config(CliArgs::parse())?;

    init_logging(&config)?;

    info!(version = vitrine::VERSION, api = %config.api.base_url, "Starting Vitrine");

    let catalog = Arc::new(StorefrontApiClient::new(
        config.api.base_url.clone(),
        config.api.timeout(),
    )?);
    let cache = ResultCache::new(key_value_store(&config), Arc::new(SystemClock))
        .with_ttl(config.cache.ttl())
        .with_prefix(config.cache.key_prefix.clone());
    let use_case = LoadFeaturedProductsUseCase::new(CatalogAggregator::new(catalog), cache)
        .with_key(config.cache.key.clone());
    let navigator = Arc::new(BrowserNavigator::new(config.api.storefront_url.clone()));

    Ok((App::new(use_case, navigator, &config), config.mouse))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let (app, mouse) = create_app()?;

    let mut terminal = ratatui::init();
    if mouse {
        execute!(stdout(), EnableMouseCapture)?;
    }

    let result = app.run(&mut terminal).await;

    if mouse {
        execute!(stdout(), DisableMouseCapture)?;
    }
    ratatui::restore();

    result
}
