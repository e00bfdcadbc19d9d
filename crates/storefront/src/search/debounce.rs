//! Cancellable delayed tasks for coalescing input bursts.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

struct Fired<T> {
    token: u64,
    value: T,
}

/// Delays a value until input has been quiet for a fixed interval.
///
/// Each [`schedule`](Self::schedule) aborts the pending timer and starts a
/// new one, so only the last value of a burst is ever delivered by
/// [`next`](Self::next). A timer that fired just before being replaced is
/// filtered out by its sequence token.
pub struct Debouncer<T> {
    delay: Duration,
    seq: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Fired<T>>,
    rx: mpsc::UnboundedReceiver<Fired<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer with the given quiet interval.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            seq: 0,
            pending: None,
            tx,
            rx,
        }
    }

    /// The quiet interval.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a value is waiting for its timer.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace any pending value with `value` and restart the timer.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn schedule(&mut self, value: T) {
        if let Some(existing) = self.pending.take() {
            existing.abort();
        }
        self.seq = self.seq.wrapping_add(1);
        let token = self.seq;
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Fired { token, value });
        }));
        trace!(token, "Debounce timer restarted");
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(existing) = self.pending.take() {
            existing.abort();
        }
        // Invalidate anything already sitting in the channel.
        self.seq = self.seq.wrapping_add(1);
    }

    /// Wait for the pending value to fire.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn next(&mut self) -> Option<T> {
        while self.pending.is_some() {
            let fired = self.rx.recv().await?;
            if fired.token == self.seq {
                self.pending = None;
                return Some(fired.value);
            }
            trace!(token = fired.token, current = self.seq, "Dropping stale debounce value");
        }
        None
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_in_burst_fires() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule("s");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("se");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("ser");

        assert_eq!(debouncer.next().await, Some("ser"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_full_delay_after_last_input() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let start = tokio::time::Instant::now();
        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule(2);

        assert_eq!(debouncer.next().await, Some(2));
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_fire() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        debouncer.schedule("first");
        assert_eq!(debouncer.next().await, Some("first"));
        debouncer.schedule("second");
        assert_eq!(debouncer.next().await, Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        debouncer.schedule("gone");
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_fired_before_reschedule_is_stale() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        debouncer.schedule("old");
        // Let the first timer fire into the channel without consuming it.
        tokio::time::sleep(Duration::from_millis(60)).await;
        debouncer.schedule("new");
        assert_eq!(debouncer.next().await, Some("new"));
    }
}
