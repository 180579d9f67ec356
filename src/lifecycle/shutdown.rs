//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcasts a single shutdown notification to every subscribed task.
///
/// The HTTP server holds one receiver; tests and the signal handler hold
/// the coordinator and call [`Shutdown::trigger`].
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe before the server starts so no notification is missed.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify all subscribers. Safe to call with none listening.
    pub fn trigger(&self) {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(subscribers = notified, "Shutdown triggered");
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
