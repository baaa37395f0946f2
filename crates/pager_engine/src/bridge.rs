//! Depth-one queue between a high-frequency signal source and the dispatch loop.
//!
//! Scroll signals arrive far faster than the controller can act on them. The
//! bridge holds at most one pending signal; anything offered while one is
//! waiting is dropped and counted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::sync::Arc;
use std::time::Duration;

pub fn signal_bridge<T>() -> (SignalSender<T>, SignalReceiver<T>) {
    let (tx, rx) = mpsc::sync_channel(1);
    let coalesced = Arc::new(AtomicU64::new(0));
    (
        SignalSender {
            tx,
            coalesced: coalesced.clone(),
        },
        SignalReceiver { rx, coalesced },
    )
}

pub struct SignalSender<T> {
    tx: SyncSender<T>,
    coalesced: Arc<AtomicU64>,
}

impl<T> Clone for SignalSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            coalesced: self.coalesced.clone(),
        }
    }
}

impl<T> SignalSender<T> {
    /// Queue `signal` unless one is already pending. Returns whether it was queued.
    pub fn offer(&self, signal: T) -> bool {
        match self.tx.try_send(signal) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.coalesced.fetch_add(1, Ordering::Relaxed);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

pub struct SignalReceiver<T> {
    rx: Receiver<T>,
    coalesced: Arc<AtomicU64>,
}

impl<T> SignalReceiver<T> {
    pub fn take(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Block up to `timeout` for the next signal. `None` on timeout or when
    /// every sender is gone.
    pub fn wait(&self, timeout: Duration) -> Option<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(signal) => Some(signal),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Signals dropped because one was already pending.
    pub fn coalesced(&self) -> u64 {
        self.coalesced.load(Ordering::Relaxed)
    }
}
