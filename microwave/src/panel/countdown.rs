//! Cancellable periodic ticker
//!
//! Sends a message into a channel once per period until disarmed. Holds
//! only a weak sender, so it never keeps the receiving task alive.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// At most one ticker task is armed at any time
#[derive(Debug, Default)]
pub struct Countdown {
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking; the first message arrives one `period` from now
    ///
    /// Re-arming replaces the running ticker.
    pub fn arm<T, F>(&mut self, tx: mpsc::WeakSender<T>, message: F, period: Duration)
    where
        T: Send + 'static,
        F: Fn() -> T + Send + 'static,
    {
        self.disarm();

        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let Some(tx) = tx.upgrade() else {
                    break;
                };
                if tx.send(message()).await.is_err() {
                    break;
                }
            }
        });

        tracing::debug!(period_ms = period.as_millis() as u64, "Countdown armed");
        self.task = Some(task);
    }

    /// Stop ticking; safe to call when already disarmed
    pub fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Countdown disarmed");
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.disarm();
    }
}
