//! Shutdown coordination for the service.

use tokio::sync::broadcast;

/// Fan-out of a single "stop now" notification.
///
/// The HTTP server holds one receiver; signal handling or a test harness
/// holds the coordinator and calls [`Shutdown::trigger`].
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown notification. Subscribers created before
    /// `trigger` observe it even if they start waiting afterwards.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of receivers still alive.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
