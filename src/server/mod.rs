// Server module entry
// Listener setup, connection handling, and graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::bind_listener;
pub use server_loop::serve;

use std::sync::Arc;
use thiserror::Error;

use crate::config::{AppState, Config};
use crate::logger;
use crate::sms::SendError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Address(String),

    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build SMS client: {0}")]
    Client(#[from] SendError),
}

/// Bind the configured address and serve until SIGINT/SIGTERM
pub async fn run(config: Config) -> Result<(), ServerError> {
    let addr = config.get_socket_addr().map_err(ServerError::Address)?;
    let listener = bind_listener(addr)?;

    logger::log_server_start(&addr, &config);
    let state = Arc::new(AppState::new(config)?);

    serve(listener, state, signal::shutdown_signal()).await?;
    Ok(())
}
