//! Debouncing of rapid input.
//!
//! A `Debouncer` owns a background task. Every `push` restarts the quiet
//! period; when the period elapses with no newer value, the last value is
//! handed to the callback. Values superseded inside the window are dropped,
//! so a burst of keystrokes produces exactly one callback.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{trace, warn};

/// Quiet period used by the search box.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

enum Signal<T> {
    Value(T),
    Cancel,
}

/// Handle to a debouncing task.
///
/// Must be created inside a tokio runtime. Dropping the handle stops the task
/// and discards any pending value.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Signal<T>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debouncing task.
    ///
    /// # Arguments
    /// * `quiet` - How long input must stay unchanged before `on_settle` runs
    /// * `on_settle` - Receives the last value of each burst
    pub fn spawn<F>(quiet: Duration, on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(rx, quiet, on_settle));
        Self { tx, task }
    }

    /// Record a new value and restart the quiet period.
    pub fn push(&self, value: T) {
        if self.tx.send(Signal::Value(value)).is_err() {
            warn!("Debouncer task has stopped; dropping input");
        }
    }

    /// Discard the pending value, if any, without running the callback.
    pub fn cancel(&self) {
        let _ = self.tx.send(Signal::Cancel);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T, F>(mut rx: mpsc::UnboundedReceiver<Signal<T>>, quiet: Duration, mut on_settle: F)
where
    F: FnMut(T),
{
    let mut pending: Option<T> = None;
    loop {
        match pending.take() {
            None => match rx.recv().await {
                Some(Signal::Value(value)) => pending = Some(value),
                Some(Signal::Cancel) => {}
                None => break,
            },
            Some(value) => {
                tokio::select! {
                    signal = rx.recv() => match signal {
                        Some(Signal::Value(newer)) => {
                            trace!("Debounce timer restarted");
                            pending = Some(newer);
                        }
                        Some(Signal::Cancel) => trace!("Pending input cancelled"),
                        None => break,
                    },
                    _ = sleep(quiet) => on_settle(value),
                }
            }
        }
    }
}
