//! Intent channel bridging producers (input threads, bots, tests) with the tick loop.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::types::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("intent queue is full, dropped {}", .0.as_str())]
    QueueFull(Intent),
    #[error("driver has shut down")]
    Closed,
}

/// Cloneable producer handle
#[derive(Debug, Clone)]
pub struct IntentSender {
    tx: mpsc::Sender<Intent>,
}

/// Consuming end, owned by the driver
#[derive(Debug)]
pub struct IntentReceiver {
    rx: mpsc::Receiver<Intent>,
}

/// Bounded intent channel; `capacity` is clamped to at least 1
pub fn intent_channel(capacity: usize) -> (IntentSender, IntentReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (IntentSender { tx }, IntentReceiver { rx })
}

impl IntentSender {
    /// Queue without waiting
    pub fn try_send(&self, intent: Intent) -> Result<(), DriverError> {
        self.tx.try_send(intent).map_err(|e| match e {
            mpsc::error::TrySendError::Full(i) => DriverError::QueueFull(i),
            mpsc::error::TrySendError::Closed(_) => DriverError::Closed,
        })
    }

    /// Queue, waiting for room. Must not be called from inside an async runtime.
    pub fn blocking_send(&self, intent: Intent) -> Result<(), DriverError> {
        self.tx.blocking_send(intent).map_err(|_| DriverError::Closed)
    }

    /// Queue from async code, waiting for room
    pub async fn send(&self, intent: Intent) -> Result<(), DriverError> {
        self.tx.send(intent).await.map_err(|_| DriverError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl IntentReceiver {
    /// Next queued intent, if any. Never blocks.
    pub fn try_recv(&mut self) -> Option<Intent> {
        self.rx.try_recv().ok()
    }

    /// Stop accepting intents; already queued ones can still be drained
    pub fn close(&mut self) {
        self.rx.close();
    }
}
