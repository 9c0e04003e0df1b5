//! Main TUI runner - entry point and event loop

use estate_api::AdminBackend;
use estate_app::config::Settings;
use estate_app::process::process_message;
use estate_app::{AppState, Message, Services};
use estate_core::prelude::*;
use tokio::sync::mpsc;

use super::{event, render, terminal};

/// Run the admin console until the user quits
pub async fn run<B>(settings: Settings, services: Services<B>) -> Result<()>
where
    B: AdminBackend + Sync + 'static,
{
    terminal::install_panic_hook();

    let logged_in = services.auth.is_logged_in();
    info!(
        "Starting console against {} (logged in: {})",
        settings.api.base_url, logged_in
    );

    let mut term = ratatui::init();

    let mut state = AppState::new(settings, logged_in);
    // Loaded files register their previews here; the state reports on them
    state.previews = services.previews.clone();

    // Background tasks report back on this channel
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    spawn_signal_handler(msg_tx.clone());

    if let Some(message) = state.startup_message() {
        process_message(&mut state, message, &msg_tx, &services);
    }

    let result = run_loop(&mut term, &mut state, msg_rx, &msg_tx, &services);

    ratatui::restore();

    let unsaved = state.dirty_forms();
    if unsaved > 0 {
        warn!("Exited with {} unsaved form(s)", unsaved);
    }
    info!("Console closed");
    result
}

/// Quit cleanly on SIGINT / SIGTERM delivered outside the terminal
fn spawn_signal_handler(msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt signal");
            let _ = msg_tx.send(Message::Quit).await;
        }
    });
}

/// Main event loop
fn run_loop<B>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: &mpsc::Sender<Message>,
    services: &Services<B>,
) -> Result<()>
where
    B: AdminBackend + Sync + 'static,
{
    while !state.should_quit() {
        // Results of background tasks
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, msg_tx, services);
        }

        terminal
            .draw(|frame| render::view(frame, state))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll()? {
            process_message(state, message, msg_tx, services);
        }
    }

    Ok(())
}
