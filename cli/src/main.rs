mod render;

use std::sync::Arc;

use clap::Parser;
use relatedbar::config::{ConfigError, RelatedbarConfig};
use relatedbar::net::ListError;
use relatedbar::net::http::HttpListService;
use relatedbar::state::options::SidebarOptions;
use relatedbar::state::scroll::{
    Extent, JsonFileScrollStore, MemoryScrollStore, ScrollStore, ScrollTracker, centered_scroll_offset,
};
use relatedbar::util::links::QueryLinkMode;
use relatedbar::{ItemId, SidebarDriver};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("list service unavailable: {0}")]
    Service(#[from] ListError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "relatedbar", about = "Show dashboards and queries related by tag")]
struct Cli {
    #[arg(long, env = "RELATEDBAR_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "RELATEDBAR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Filter by these tags instead of borrowing them (repeatable).
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Borrow tags from this dashboard.
    #[arg(long)]
    dashboard_id: Option<String>,

    /// Borrow tags from this query.
    #[arg(long)]
    query_id: Option<String>,

    #[arg(long)]
    exclude_dashboard_id: Option<String>,

    #[arg(long)]
    exclude_query_id: Option<String>,

    #[arg(long)]
    active_dashboard_id: Option<String>,

    #[arg(long)]
    active_query_id: Option<String>,

    #[arg(long, default_value_t = false)]
    no_dashboards: bool,

    #[arg(long, default_value_t = false)]
    no_queries: bool,

    /// Link queries to their editor instead of the results view.
    #[arg(long, default_value_t = false)]
    edit_links: bool,

    /// Print the snapshot as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Save this scroll offset for the current sidebar mode.
    #[arg(long)]
    scroll_offset: Option<i64>,

    /// Visible rows used to center the focused entry.
    #[arg(long, default_value_t = 20)]
    viewport_rows: i64,
}

impl Cli {
    /// Flags win over the environment-derived config.
    fn config(&self, mut config: RelatedbarConfig) -> RelatedbarConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_owned();
        }
        if let Some(api_key) = self.api_key.as_ref().filter(|key| !key.is_empty()) {
            config.api_key = Some(api_key.clone());
        }
        config
    }

    fn options(&self) -> SidebarOptions {
        let id = |raw: &Option<String>| raw.as_deref().map(ItemId::from);
        SidebarOptions {
            tags: self.tags.clone(),
            exclude_dashboard_id: id(&self.exclude_dashboard_id),
            exclude_query_id: id(&self.exclude_query_id),
            show_dashboards: !self.no_dashboards,
            show_queries: !self.no_queries,
            active_dashboard_id: id(&self.active_dashboard_id),
            active_query_id: id(&self.active_query_id),
            fetch_tags_from_dashboard_id: id(&self.dashboard_id),
            fetch_tags_from_query_id: id(&self.query_id),
            query_link_mode: if self.edit_links { QueryLinkMode::Edit } else { QueryLinkMode::View },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config(RelatedbarConfig::from_env()?);
    run(&cli, &config).await
}

async fn run(cli: &Cli, config: &RelatedbarConfig) -> Result<(), CliError> {
    let service = Arc::new(HttpListService::new(config)?);
    tracing::info!(base_url = service.base_url(), "list service configured");

    let mut driver = SidebarDriver::new(service, config.fetch_settings(), cli.options());
    driver.on_ready(|| tracing::info!("sidebar ready"));
    driver.mount();
    driver.settle().await;

    let sidebar = driver.sidebar();
    let store: Box<dyn ScrollStore> = match &config.scroll_file {
        Some(path) => Box::new(JsonFileScrollStore::new(path.clone())),
        None => Box::new(MemoryScrollStore::new()),
    };
    let tracker = ScrollTracker::mount(store.as_ref(), sidebar.mode());
    if let Some(offset) = cli.scroll_offset {
        tracker.record(offset);
    }

    let snapshot = sidebar.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let rendered = render::render(&snapshot);
    for line in &rendered.lines {
        println!("{line}");
    }

    let viewport = Extent { top: tracker.restored_offset().unwrap_or(0), height: cli.viewport_rows };
    let focus = rendered
        .focus_row()
        .and_then(|row| i64::try_from(row).ok())
        .and_then(|row| centered_scroll_offset(viewport, Extent { top: row, height: 1 }));
    match (focus, tracker.restored_offset()) {
        (Some(offset), _) => eprintln!("scroll: {offset} (centered on focus)"),
        (None, Some(offset)) => eprintln!("scroll: {offset} (restored for {})", tracker.mode().key()),
        (None, None) => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;
