use std::io;
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use showroom::db::DbService;
use showroom::db::store::{ProductStore, SurrealProductStore};
use showroom::{Config, sync, ui};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // 1. Load configuration
    let config = Config::from_env();

    // 2. Route logs into the TUI pane
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},surrealdb=warn", config.log_level)));
    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    tracing::info!("Showroom starting...");

    // 3. Open the catalog database
    std::fs::create_dir_all(&config.work_dir)?;
    let db = DbService::new(&config.db_path()).await?;
    let store: Arc<dyn ProductStore> = Arc::new(SurrealProductStore::new(db.db.clone()));

    // 4. Establish the live subscription; on failure the grid simply stays
    //    empty-and-stale while the rest of the UI keeps working
    let subscription = sync::subscribe(store.clone()).await;

    // 5. Run the TUI
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = ui::App::new(store);
    let res = ui::run(&mut terminal, &mut app, subscription).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
