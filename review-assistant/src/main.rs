// Reviewer2 terminal client entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the review backend
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;

use review_assistant::api::ApiClient;
use review_assistant::app;
use review_assistant::config::{self, ApiMode};
use review_assistant::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Reviewer2 client starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: mode={:?}, base_url={}, default version={}",
        config.api.mode, config.api.base_url, config.default_version
    );

    // 3. Build the review backend
    let backend = ApiClient::from_config(&config).context("failed to build API client")?;
    match config.api.mode {
        ApiMode::Http => info!("Using HTTP backend at {}", config.api.base_url),
        ApiMode::Demo => info!("Using demo backend (canned prompts and reviews)"),
    }

    // 4. Create mpsc channels
    let (api_tx, api_rx) = mpsc::channel(16);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(Arc::new(backend), config.default_version, api_tx);

    // 5. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(api_rx, cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI event loop (blocking until user quits)
    if let Err(e) = tui::run(ui_rx, cmd_tx, config.display.chars_per_second).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Reviewer2 client shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("review-assistant.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("review_assistant=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
