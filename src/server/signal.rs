// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) both stop the relay from accepting new
// connections. Other platforms only get Ctrl+C.

use crate::logger;

/// Resolve once a shutdown signal arrives
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            return wait_for_ctrl_c().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("[SIGNAL] SIGTERM received"),
        () = wait_for_ctrl_c() => {}
    }
}

#[cfg(not(unix))]
pub async fn shutdown_signal() {
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("[SIGNAL] SIGINT received (Ctrl+C)"),
        Err(e) => {
            logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
            // Without a signal source, run until the process is killed
            std::future::pending::<()>().await;
        }
    }
}
