use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use storefront::app::{App, AppEvent};
use storefront::catalog::{CatalogClient, CatalogRepository, InMemoryCatalog};
use storefront::config::Config;
use storefront::listing::{derive_view, FilterMode, SortMode, ViewQuery};
use storefront::ui;

/// Get the config directory path (~/.config/storefront/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("storefront"))
}

#[derive(Parser, Debug)]
#[command(
    name = "storefront",
    about = "Browse a remote product catalog: filter, sort and page through it"
)]
struct Args {
    /// Config file (default: ~/.config/storefront/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog API root, overrides `api_base_url`
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Number of products to request, overrides `product_limit`
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// The most recent filter replaces the other instead of combining
    #[arg(long)]
    exclusive_filters: bool,

    /// Print one page of the listing and exit instead of starting the TUI
    #[arg(long)]
    print: bool,

    /// Category slug to filter by (print mode)
    #[arg(long, requires = "print")]
    category: Option<String>,

    /// Title search text (print mode)
    #[arg(long, requires = "print")]
    search: Option<String>,

    /// Sort: default, asc, desc, stock or name (print mode)
    #[arg(long, requires = "print", value_parser = parse_sort)]
    sort: Option<SortMode>,

    /// 1-based page number (print mode)
    #[arg(long, requires = "print", default_value_t = 1)]
    page: usize,

    /// Emit the page as JSON (print mode)
    #[arg(long, requires = "print")]
    json: bool,
}

fn parse_sort(s: &str) -> Result<SortMode, String> {
    s.parse()
}

/// Route logs to a file in TUI mode so they do not draw over the screen.
fn init_tracing(print_mode: bool, config_dir: &Path) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    if print_mode {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    let log_path = config_dir.join("storefront.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    Ok(())
}

fn load_config(args: &Args, config_dir: &Path) -> Result<Config> {
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config =
        Config::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;

    if let Some(url) = &args.base_url {
        config.api_base_url = url.clone();
    }
    if let Some(limit) = args.limit {
        config.product_limit = limit;
    }
    if args.exclusive_filters {
        config.filter_mode = FilterMode::Exclusive;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    init_tracing(args.print, &config_dir)?;

    let config = load_config(&args, &config_dir)?;
    let client = CatalogClient::new(&config.api_base_url, config.request_timeout())
        .context("Invalid catalog API URL")?;

    if args.print {
        return print_listing(&args, &config, &client).await;
    }

    let repository: Arc<dyn CatalogRepository> = Arc::new(InMemoryCatalog::new());
    let mut app = App::new(repository, &config);

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
        eprintln!("Warning: {}", warning);
    }

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, client, event_tx, event_rx).await?;
    Ok(())
}

/// Fetch the catalog, apply the CLI query and print one page.
async fn print_listing(args: &Args, config: &Config, client: &CatalogClient) -> Result<()> {
    let products = client
        .fetch_products(config.product_limit)
        .await
        .context("Failed to fetch products")?;

    let mut query = ViewQuery::new(config.page_size, config.filter_mode);
    if let Some(category) = &args.category {
        query.select_category(Some(category.clone()));
    }
    if let Some(search) = &args.search {
        query.set_search(search.as_str());
    }
    if let Some(sort) = args.sort {
        query.set_sort(sort);
    }
    query.set_page(args.page.saturating_sub(1));

    let view = derive_view(&products, &query);
    tracing::info!(
        total = products.len(),
        matched = view.len(),
        page = query.page(),
        "Derived listing"
    );

    if args.json {
        let out = serde_json::json!({
            "total": view.len(),
            "page": query.page() + 1,
            "pages": view.page_count(),
            "products": view.visible(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{} ({} products, page {} of {})",
        query.category_label(),
        view.len(),
        query.page() + 1,
        view.page_count()
    );
    for product in view.visible() {
        let stock = product.stock_or_zero();
        println!(
            "{:>5}  {:<40}  ${:>9.2}  stock {:>4}  {}",
            product.id,
            product.title,
            product.effective_price(),
            stock,
            product.category
        );
    }
    if view.page_out_of_range() {
        println!("No products on this page");
    } else if view.is_empty() {
        println!("No products found");
    }
    Ok(())
}
