//! Single-owner store for the current timestamp.
//!
//! The value lives inside one background task. Every other task talks to it
//! through a FIFO mailbox, so sets and gets are applied one at a time in the
//! order they were sent and no caller can ever see a half-written value.
//! Reads carry their own one-shot reply channel.

use crate::timestamp::Timestamp;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Number of queued operations before senders have to wait.
const MAILBOX_CAPACITY: usize = 64;

enum Command {
    Set(Timestamp),
    Get(oneshot::Sender<Timestamp>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("time store is no longer running")]
    Closed,
}

/// Handle to the running store. Cheap to clone; all clones address the same
/// owning task.
#[derive(Debug, Clone)]
pub struct TimeStore {
    command_tx: mpsc::Sender<Command>,
}

impl TimeStore {
    /// Start the owning task with the current time as its value.
    ///
    /// The task stops once `shutdown_rx` observes `true` (or its sender is
    /// dropped), or once every handle has been dropped.
    pub fn spawn(shutdown_rx: watch::Receiver<bool>) -> (Self, JoinHandle<()>) {
        Self::spawn_with(Timestamp::now(), shutdown_rx)
    }

    /// Start the owning task with an explicit initial value.
    pub fn spawn_with(
        initial: Timestamp,
        shutdown_rx: watch::Receiver<bool>,
    ) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(MAILBOX_CAPACITY);
        let handle = tokio::spawn(run(initial, command_rx, shutdown_rx));
        (Self { command_tx }, handle)
    }

    /// Replace the stored value.
    ///
    /// Returns once the owning task's mailbox has accepted the write; any
    /// `get` sent after that observes this value or a later one. A write sent
    /// after shutdown is dropped.
    pub async fn set(&self, timestamp: Timestamp) {
        if self.command_tx.send(Command::Set(timestamp)).await.is_err() {
            tracing::debug!(%timestamp, "time store stopped, dropping write");
        }
    }

    /// Read the stored value.
    pub async fn get(&self) -> Result<Timestamp, StoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Get(reply_tx))
            .await
            .map_err(|_| StoreError::Closed)?;
        reply_rx.await.map_err(|_| StoreError::Closed)
    }
}

async fn run(
    mut current: Timestamp,
    mut command_rx: mpsc::Receiver<Command>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    tracing::info!(initial = %current, "time store started");

    loop {
        tokio::select! {
            // Shutdown wins over queued commands.
            biased;
            _ = shutdown_rx.wait_for(|stop| *stop) => break,
            command = command_rx.recv() => match command {
                Some(Command::Set(timestamp)) => current = timestamp,
                Some(Command::Get(reply_tx)) => {
                    // The requester may have gone away; nothing to do then.
                    let _ = reply_tx.send(current);
                }
                None => break,
            },
        }
    }

    tracing::info!(last = %current, "time store stopped");
}
