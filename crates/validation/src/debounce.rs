//! Trailing-edge debouncing
//!
//! Collapses a burst of triggers into one delayed call of the action, using
//! the arguments of the last trigger in the burst.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Debounced wrapper around an action
///
/// Holds at most one scheduled call. Triggering again aborts the scheduled
/// call and schedules a fresh one `delay` from now. Dropping the debouncer
/// aborts whatever is still scheduled.
///
/// Must be used from inside a tokio runtime. On a multi-threaded runtime a
/// timer that has already elapsed may still run its action concurrently
/// with a new trigger, so callers that need the strict guarantee should
/// drive it from a current-thread runtime.
pub struct Debouncer<T> {
    delay: Duration,
    action: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer that calls `action` after `delay` of quiet
    pub fn new<F>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            action: Arc::new(action),
            pending: None,
        }
    }

    /// Schedule the action with `value`, superseding any scheduled call
    pub fn trigger(&mut self, value: T) {
        self.cancel();

        let action = Arc::clone(&self.action);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action(value);
        }));
    }
}

impl<T> Debouncer<T> {
    /// Drop the scheduled call, if any
    ///
    /// Returns true if a call was still waiting to fire.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let live = !handle.is_finished();
                handle.abort();
                live
            }
            None => false,
        }
    }

    /// Whether a call is scheduled and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    fn recording(delay_ms: u64) -> (Debouncer<String>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(Duration::from_millis(delay_ms), move |value: String| {
            let _ = tx.send(value);
        });
        (debouncer, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
        let mut fired = Vec::new();
        while let Ok(value) = rx.try_recv() {
            fired.push(value);
        }
        fired
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_value() {
        let (mut debouncer, mut rx) = recording(1000);

        debouncer.trigger("e".to_string());
        sleep(Duration::from_millis(200)).await;
        debouncer.trigger("ev".to_string());
        sleep(Duration::from_millis(200)).await;
        debouncer.trigger("eve".to_string());

        sleep(Duration::from_millis(999)).await;
        assert!(drain(&mut rx).is_empty());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(drain(&mut rx), vec!["eve".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_trigger_never_fires() {
        let (debouncer, mut rx) = recording(50);

        sleep(Duration::from_secs(5)).await;

        assert!(drain(&mut rx).is_empty());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let (mut debouncer, mut rx) = recording(100);

        debouncer.trigger("a".to_string());
        sleep(Duration::from_millis(150)).await;
        debouncer.trigger("b".to_string());
        sleep(Duration::from_millis(150)).await;

        assert_eq!(drain(&mut rx), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let (mut debouncer, mut rx) = recording(100);

        debouncer.trigger("a".to_string());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        sleep(Duration::from_millis(500)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_scheduled_call() {
        let (mut debouncer, mut rx) = recording(100);

        debouncer.trigger("a".to_string());
        drop(debouncer);

        sleep(Duration::from_millis(500)).await;
        assert!(drain(&mut rx).is_empty());
    }
}
