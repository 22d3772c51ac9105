use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

/// Fans a single shutdown event out to the server and its cleanup task.
///
/// Cloning is cheap; every clone observes the same event.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// True once [`trigger`](Self::trigger) has run.
    pub fn is_shutting_down(&self) -> bool {
        *self.tx.borrow()
    }

    /// Mark shutdown as started. Repeated calls are no-ops.
    pub fn trigger(&self) {
        let changed = self.tx.send_if_modified(|started| {
            if *started {
                false
            } else {
                *started = true;
                true
            }
        });
        if changed {
            info!("Initiating graceful shutdown");
        }
    }

    /// Resolves once shutdown has been triggered, immediately if it already was.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // wait_for only errors when the sender is dropped, which `self` prevents
        let _ = rx.wait_for(|started| *started).await;
    }

    /// Wait for SIGINT or SIGTERM, then trigger shutdown.
    pub async fn wait_for_signal(&self) {
        shutdown_signal().await;
        self.trigger();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM signal, shutting down gracefully"),
    }
}
