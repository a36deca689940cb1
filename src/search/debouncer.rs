// src/search/debouncer.rs
//! Debounce for the free-text search box.
//!
//! Each `push` replaces the pending value and re-arms a single timer; only a
//! value that stays unchanged for the whole delay is sent downstream.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No timer armed
    Idle,
    /// Timer armed, holding the latest value
    Pending,
}

/// Must be used from within a tokio runtime. Dropping the debouncer cancels
/// any pending emission.
pub struct SearchDebouncer<T> {
    delay: Duration,
    output: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> SearchDebouncer<T> {
    pub fn new(delay: Duration, output: UnboundedSender<T>) -> Self {
        Self {
            delay,
            output,
            pending: None,
        }
    }

    pub fn with_default_delay(output: UnboundedSender<T>) -> Self {
        Self::new(DEFAULT_DEBOUNCE_DELAY, output)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the quiet period
    pub fn push(&mut self, value: T) {
        self.cancel();

        // deadline fixed now, not when the task first gets polled
        let deadline = Instant::now() + self.delay;
        let output = self.output.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            // receiver gone means the consumer was torn down; nothing to do
            let _ = output.send(value);
        }));
        trace!("Debounce timer armed for {:?}", self.delay);
    }

    /// Drop the pending value without emitting it
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                trace!("Debounce timer reset");
            }
            handle.abort();
        }
    }

    /// Stop accepting input but let a pending emission complete. The output
    /// channel closes once that emission (if any) has been sent.
    pub fn finish(mut self) {
        // detach: dropping a JoinHandle does not abort the task
        self.pending.take();
    }

    pub fn state(&self) -> DebounceState {
        match &self.pending {
            Some(handle) if !handle.is_finished() => DebounceState::Pending,
            _ => DebounceState::Idle,
        }
    }
}

impl<T> Drop for SearchDebouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::advance;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_is_emitted_after_quiet_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(500), tx);
        let start = Instant::now();

        debouncer.push("a".to_string());
        advance(Duration::from_millis(100)).await;
        debouncer.push("ab".to_string());
        advance(Duration::from_millis(100)).await;
        debouncer.push("abc".to_string());

        let emitted = rx.recv().await.unwrap();
        assert_eq!(emitted, "abc");
        assert_eq!(start.elapsed(), Duration::from_millis(700));

        settle().await;
        assert_eq!(debouncer.state(), DebounceState::Idle);

        drop(debouncer);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_emitted_before_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = SearchDebouncer::with_default_delay(tx);

        debouncer.push(1);
        assert_eq!(debouncer.state(), DebounceState::Pending);

        advance(Duration::from_millis(499)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
        assert_eq!(debouncer.state(), DebounceState::Pending);

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(rx.try_recv().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_emission() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(200), tx);

        debouncer.push("draft");
        debouncer.cancel();
        assert_eq!(debouncer.state(), DebounceState::Idle);

        advance(Duration::from_secs(1)).await;
        settle().await;
        assert!(rx.try_recv().is_err());

        debouncer.push("final");
        assert_eq!(rx.recv().await, Some("final"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_emission() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(500), tx);

        debouncer.push("typed then closed".to_string());
        advance(Duration::from_millis(300)).await;
        drop(debouncer);

        // every sender is gone once the aborted timer task is dropped
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_delivers_pending_then_closes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(500), tx);

        debouncer.push("last words".to_string());
        debouncer.finish();

        assert_eq!(rx.recv().await.as_deref(), Some("last words"));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_emit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(50), tx);

        debouncer.push("rust");
        assert_eq!(rx.recv().await, Some("rust"));

        debouncer.push("rus");
        debouncer.push("ru");
        assert_eq!(rx.recv().await, Some("ru"));
    }
}
