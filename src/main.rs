//! Renders a dashboard page the way it looks after startup.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use estate_dashboard_shell::config::ConfigManager;
use estate_dashboard_shell::dom::Document;
use estate_dashboard_shell::fetch::{
    FileFetcher,
    Fetcher,
    HttpFetcher,
};
use estate_dashboard_shell::page::PageLocation;
use estate_dashboard_shell::storage::{
    FileStorage,
    MemoryStorage,
    Storage,
};
use estate_dashboard_shell::AppContext;
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "dashboard-shell")]
#[command(about = "Load shared fragments and translations into a dashboard page")]
struct Cli {
    /// Page markup to render
    page: PathBuf,

    /// Directory holding `.dashboard-shell.json` (defaults to the page's directory)
    #[arg(long)]
    site_root: Option<PathBuf>,

    /// Page URL; fragments and dictionaries are fetched relative to it over HTTP
    #[arg(long)]
    base_url: Option<String>,

    /// Language to switch to after startup
    #[arg(long)]
    lang: Option<String>,

    /// JSON file standing in for durable browser storage
    #[arg(long)]
    storage: Option<PathBuf>,
}

/// Parses the page, runs startup and prints the resulting markup.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();

    let cli = Cli::parse();
    let page_path = std::path::absolute(&cli.page).context("Failed to resolve page path")?;
    let page_dir = page_path.parent().map_or_else(PathBuf::new, Path::to_path_buf);

    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(Some(cli.site_root.clone().unwrap_or_else(|| page_dir.clone())))
        .context("Failed to load settings")?;
    let settings = config_manager.get_settings();

    let (fetcher, location): (Arc<dyn Fetcher>, PageLocation) = match &cli.base_url {
        Some(url) => {
            let fetcher = HttpFetcher::new(url)?;
            let location = PageLocation::new(fetcher.pathname());
            (Arc::new(fetcher), location)
        }
        None => (
            Arc::new(FileFetcher::new(&page_dir)),
            PageLocation::new(page_path.to_string_lossy()),
        ),
    };

    let storage: Arc<dyn Storage> = match &cli.storage {
        Some(path) => Arc::new(FileStorage::open(path).context("Failed to open storage file")?),
        None => Arc::new(MemoryStorage::new()),
    };

    let markup = tokio::fs::read_to_string(&page_path)
        .await
        .with_context(|| format!("Failed to read page {}", page_path.display()))?;
    let mut doc = Document::parse(&markup).context("Failed to parse page")?;

    let mut context = AppContext::new(
        settings,
        location,
        storage,
        Arc::new(MemoryStorage::new()),
        fetcher,
        sys_locale::get_locale(),
    );
    context.initialize(&mut doc).await;
    if let Some(code) = &cli.lang {
        context.change_language(&mut doc, code).await;
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(doc.to_html().as_bytes())?;
    stdout.flush()?;
    Ok(())
}
