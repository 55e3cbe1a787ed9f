//! RemotePad client entry point.
//!
//! Wires together the config file, the gesture session, the TCP transport,
//! and the scripted input source, then runs until the script finishes, the
//! connection fails, or Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()                -- TOML config with serde defaults
//!  └─ TransportChannel::connect()  -- spawns the socket worker
//!  └─ TouchSession::run()          -- classifier + one input queue
//!  └─ ScriptedTouchSource::replay()-- drives the input surfaces
//!       └─ status loop             -- folds StatusEvents into PadAppState,
//!                                     shuts the session down on terminal
//!                                     connection failure
//! ```
//!
//! The scripted source stands in for a touch surface.  A real frontend would
//! replace it with a view layer feeding the same `SessionInput` queue.

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use remotepad_client::application::endpoint::Endpoint;
use remotepad_client::application::session::{
    SessionInput, TouchSession, SESSION_QUEUE_DEPTH,
};
use remotepad_client::infrastructure::{
    config::{config_file_path, load_config, save_config},
    input::{GestureScript, ScriptedTouchSource, TouchSource},
    transport::TransportChannel,
    ui_bridge::{ConnectionState, PadAppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: its log level seeds the filter when RUST_LOG is unset.
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}; using defaults");
            Default::default()
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log.level.clone())),
        )
        .init();

    info!("RemotePad client starting");

    // First run: persist the defaults so users have a file to edit.
    if let Ok(path) = config_file_path() {
        if !path.exists() {
            match save_config(&config) {
                Ok(()) => info!(path = %path.display(), "wrote default config"),
                Err(err) => warn!(%err, "could not write default config"),
            }
        }
    }

    let endpoint = Endpoint::new(config.connection.host.clone(), config.connection.port)?;

    // ── Transport and status ──────────────────────────────────────────────────
    let app_state = PadAppState::new();
    let (transport, mut status_rx) = TransportChannel::connect(endpoint.clone());

    // ── Gesture session ───────────────────────────────────────────────────────
    let (session_tx, session_rx) = tokio::sync::mpsc::channel(SESSION_QUEUE_DEPTH);
    let session = TouchSession::new(config.gesture.clone(), transport.clone());
    let session_handle = tokio::spawn(session.run(session_rx));

    // Fold status events into shared state; a failed connect is terminal, so
    // it also shuts the session down.
    let status_state = app_state.clone();
    let status_session_tx = session_tx.clone();
    let status_handle = tokio::spawn(async move {
        while let Some(event) = status_rx.recv().await {
            status_state.apply(&event).await;
            if event.state() == Some(ConnectionState::Failed) {
                error!("connection failed, stopping session");
                let _ = status_session_tx.send(SessionInput::Shutdown).await;
            }
        }
    });

    // ── Input source ──────────────────────────────────────────────────────────
    // A script path on the command line, or the built-in demo.
    let script = match std::env::args().nth(1) {
        Some(path) => GestureScript::load(&path)?,
        None => {
            info!("no script given, playing built-in demo");
            GestureScript::builtin_demo()
        }
    };
    let replay_tx = session_tx.clone();
    let replay = ScriptedTouchSource::new(script).run(replay_tx);

    tokio::select! {
        _ = replay => {
            // Let trailing classifier deadlines (tap confirmation) resolve
            // before tearing down.
            tokio::time::sleep(std::time::Duration::from_millis(400)).await;
            info!("script finished");
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("shutdown signal received");
        }
    }

    // Orderly shutdown: the session closes the transport behind every command
    // it already submitted.
    let _ = session_tx.send(SessionInput::Shutdown).await;
    session_handle.await?;
    drop(transport);
    status_handle.await?;

    let (state, message) = app_state.snapshot().await;
    info!(?state, %message, "RemotePad client stopped");
    Ok(())
}
