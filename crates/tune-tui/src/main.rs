mod action;
mod app;
mod app_state;
mod component;
mod components;
mod core;
mod focus;
mod theme;
mod widgets;

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tune_proto::assistant::{Assistant, GeminiAssistant};
use tune_proto::catalog::load_catalog;
use tune_proto::config::Config;
use tune_proto::protocol::ViewMode;
use tune_proto::state::StateManager;

/// What the SessionCore broadcasts to the UI.
#[derive(Debug, Clone)]
pub enum BroadcastMessage {
    /// The session changed; receivers should fetch from StateManager.
    StateUpdated,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = tune_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("rhythmotune.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // The terminal belongs to the TUI; point the operator at the log instead.
    eprintln!("rhythmotune log: {}", log_path.display());

    tracing::info!("rhythmotune starting…");

    // ── Load config + catalog ────────────────────────────────────────────────
    let config = Config::load().unwrap_or_default();
    let catalog = load_catalog(&config.catalog.catalog_toml);
    let view_mode = if config.ui.show_splash {
        ViewMode::Splash
    } else {
        ViewMode::Main
    };
    let state_manager = StateManager::new(catalog, view_mode)?;

    let assistant: Arc<dyn Assistant> = Arc::new(GeminiAssistant::from_config(&config.assistant));

    // ── Broadcast channel (SessionCore → TUI) ────────────────────────────────
    let (broadcast_tx, broadcast_rx) = broadcast::channel::<BroadcastMessage>(256);

    // ── CoreEvent channel (TUI/assistant tasks → SessionCore) ────────────────
    let (event_tx, event_rx) = mpsc::channel::<core::CoreEvent>(256);

    let session_core = core::SessionCore::new(
        Arc::new(state_manager),
        assistant,
        broadcast_tx,
        event_tx.clone(),
    );
    let state_manager = session_core.state_manager();
    let initial = state_manager.get_state().await;

    tokio::spawn(session_core.run(event_rx));

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(event_tx, state_manager, initial);
    app.run(broadcast_rx).await?;

    tracing::info!("rhythmotune exiting");
    Ok(())
}
