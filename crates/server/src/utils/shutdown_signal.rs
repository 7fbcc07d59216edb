use std::future::pending;

use tokio::signal;

/// Resolves on Ctrl+C or SIGTERM. A handler that fails to install is logged
/// and never fires, so the other one still can.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(err) = signal::ctrl_c().await {
      tracing::error!(%err, "failed to install Ctrl+C handler");
      pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(err) => {
        tracing::error!(%err, "failed to install SIGTERM handler");
        pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = pending::<()>();

  tokio::select! {
    () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
    () = terminate => tracing::info!("received SIGTERM, shutting down"),
  }
}
