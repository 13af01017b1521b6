//! Delayed reset after an order has been sent.

use std::time::Duration;

use tokio::task::JoinHandle;

/// A one-shot timer scheduled on the tokio runtime.
///
/// The action runs on the runtime once the delay has passed, unless the
/// timer is cancelled first. Dropping the timer does not stop it.
#[derive(Debug)]
pub struct ResetTimer {
    handle: JoinHandle<()>,
    delay: Duration,
}

impl ResetTimer {
    /// Run `action` after `delay`. Must be called inside a tokio runtime.
    pub fn schedule<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        Self { handle, delay }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Check if the action has run (or the timer was aborted).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the timer. Returns `false` if it was aborted instead of firing.
    ///
    /// Call at most once after completion.
    pub async fn fired(&mut self) -> bool {
        (&mut self.handle).await.is_ok()
    }

    /// Abort the timer. The action does not run if it has not already.
    pub fn cancel(self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn flag() -> (Arc<AtomicBool>, impl FnOnce() + Send + 'static) {
        let flag = Arc::new(AtomicBool::new(false));
        let set = Arc::clone(&flag);
        (flag, move || set.store(true, Ordering::SeqCst))
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (ran, action) = flag();
        let mut timer = ResetTimer::schedule(Duration::from_secs(3), action);
        assert_eq!(timer.delay(), Duration::from_secs(3));
        let started = tokio::time::Instant::now();
        assert!(timer.fired().await);
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(timer.is_finished());
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_runs_without_waiting_on_timer() {
        let (ran, action) = flag();
        let timer = ResetTimer::schedule(Duration::from_secs(3), action);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!timer.is_finished());
        assert!(!ran.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(timer.is_finished());
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_runs_action() {
        let (ran, action) = flag();
        let timer = ResetTimer::schedule(Duration::from_secs(3), action);
        timer.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!ran.load(Ordering::SeqCst));
    }
}
