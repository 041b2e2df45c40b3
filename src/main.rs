//! Outfit Wizard - step-by-step outfit customizer
//!
//! Loads a color catalog per avatar layer, then lets the user pick colors
//! step by step in the terminal. `--headless` skips the UI and prints the
//! resulting session as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use outfit_wizard::config::{Config, PopulationMode};
use outfit_wizard::constants::{APP_BINARY_NAME, APP_NAME};
use outfit_wizard::render::RenderSink;
use outfit_wizard::services::{CatalogLoader, CatalogSource, FileCatalogSource};
use outfit_wizard::session::{OutfitSession, SessionOptions};

/// Outfit Wizard - pick a color for every layer of your avatar
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the color catalog files
    #[arg(long, value_name = "DIR")]
    catalog_dir: Option<PathBuf>,

    /// Base URL to fetch color catalogs from
    #[cfg(feature = "http")]
    #[arg(long, value_name = "URL")]
    catalog_url: Option<String>,

    /// Do not select the first color when a catalog arrives
    #[arg(long)]
    no_default_color: bool,

    /// Populate controls only after every catalog has loaded
    #[arg(long)]
    batch: bool,

    /// Print the session as JSON instead of starting the terminal UI
    #[arg(long)]
    headless: bool,

    /// Pick a random outfit after loading
    #[arg(long)]
    randomize: bool,

    /// Seed for --randomize
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn interactive(&self) -> bool {
        cfg!(feature = "tui") && !self.headless
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let filter = if args.verbose { "debug" } else { "info" };
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if args.interactive() {
        // Logs on stderr would tear the alternate screen
        let log_dir = Config::config_dir()?;
        std::fs::create_dir_all(&log_dir).context(format!(
            "Failed to create log directory: {}",
            log_dir.display()
        ))?;
        let log_path = log_dir.join(format!("{APP_BINARY_NAME}.log"));
        let file = std::fs::File::create(&log_path)
            .context(format!("Failed to create log file: {}", log_path.display()))?;
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(dir) = &args.catalog_dir {
        config.catalog.root = Some(dir.clone());
    }
    #[cfg(feature = "http")]
    if let Some(url) = &args.catalog_url {
        config.catalog.base_url = Some(url.clone());
    }
    if args.no_default_color {
        config.behavior.default_to_first_color = false;
    }
    if args.batch {
        config.behavior.population = PopulationMode::Batch;
    }

    config.validate()?;
    Ok(config)
}

fn catalog_source(config: &Config) -> Result<Arc<dyn CatalogSource>> {
    #[cfg(feature = "http")]
    if let Some(url) = &config.catalog.base_url {
        info!("Catalog base URL: {url}");
        return Ok(Arc::new(outfit_wizard::services::HttpCatalogSource::new(
            url.clone(),
        )));
    }

    let root = config.catalog_root()?;
    info!("Catalog directory: {}", root.display());
    Ok(Arc::new(FileCatalogSource::new(root)))
}

fn build_session<S: RenderSink>(config: &Config, args: &Args, sink: S) -> OutfitSession<S> {
    let session = OutfitSession::new(
        config.layers.clone(),
        SessionOptions::from_config(config),
        sink,
    );
    match args.seed {
        Some(seed) => session.with_seed(seed),
        None => session,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let config = load_config(&args)?;
    let loader =
        CatalogLoader::new(catalog_source(&config)?).with_timeout(config.catalog.timeout());

    // Worker threads keep catalog loads moving while the TUI loop runs
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    info!("{} v{} starting", APP_NAME, env!("CARGO_PKG_VERSION"));

    #[cfg(feature = "tui")]
    if args.interactive() {
        return run_interactive(&config, &args, &loader, &runtime);
    }

    let mut session = build_session(&config, &args, outfit_wizard::render::HeadlessSink::new());
    session.start();
    runtime.block_on(session.load_catalogs(&loader));
    if args.randomize {
        session.randomize();
    }

    let snapshot = serde_json::to_string_pretty(&session.snapshot())
        .context("Failed to serialize session")?;
    println!("{snapshot}");
    Ok(())
}

#[cfg(feature = "tui")]
fn run_interactive(
    config: &Config,
    args: &Args,
    loader: &CatalogLoader,
    runtime: &tokio::runtime::Runtime,
) -> Result<()> {
    use outfit_wizard::tui::{self, TerminalSink, Theme, TuiApp};

    let mut session = build_session(config, args, TerminalSink::new());
    session.start();

    let feed = session.spawn_catalog_load(loader, runtime.handle());
    let mut terminal = tui::setup_terminal()?;
    let mut app = TuiApp::new(session, Theme::from_mode(config.ui.theme_mode))
        .with_feed(feed, args.randomize);

    let result = tui::run_tui(&mut app, &mut terminal);

    tui::restore_terminal(terminal)?;
    result
}
