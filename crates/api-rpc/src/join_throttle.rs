//! Join Throttle
//!
//! Caps how often a single actor may push join requests through the
//! RPC surface. Sliding window per actor: at most `max_per_window`
//! attempts inside any `window`-sized span.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use muster_core::domain::ActorId;

pub struct JoinThrottle {
    attempts: Mutex<HashMap<ActorId, Vec<Instant>>>,
    max_per_window: usize,
    window: Duration,
}

impl JoinThrottle {
    pub fn new(max_per_window: usize, window: Duration) -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
            max_per_window,
            window,
        }
    }

    /// Record one attempt for `actor`. Returns false when the actor has
    /// exhausted its window; the refused attempt is not recorded.
    pub async fn check(&self, actor: ActorId) -> bool {
        let now = Instant::now();
        let mut attempts = self.attempts.lock().await;
        let window = attempts.entry(actor).or_default();
        window.retain(|t| now.duration_since(*t) < self.window);

        if window.len() >= self.max_per_window {
            return false;
        }
        window.push(now);
        true
    }

    /// Drop actors whose entire window has aged out
    pub async fn prune(&self) {
        let now = Instant::now();
        let mut attempts = self.attempts.lock().await;
        attempts.retain(|_, window| {
            window.retain(|t| now.duration_since(*t) < self.window);
            !window.is_empty()
        });
    }

    #[allow(dead_code)] // Used for metrics surfaces
    pub async fn tracked_actors(&self) -> usize {
        self.attempts.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn allows_up_to_the_burst() {
        let throttle = JoinThrottle::new(3, Duration::from_secs(10));
        for _ in 0..3 {
            assert!(throttle.check(7).await);
        }
        assert!(!throttle.check(7).await);
    }

    #[tokio::test]
    async fn actors_are_throttled_independently() {
        let throttle = JoinThrottle::new(1, Duration::from_secs(10));
        assert!(throttle.check(7).await);
        assert!(!throttle.check(7).await);
        assert!(throttle.check(8).await);
    }

    #[tokio::test]
    async fn window_expiry_readmits() {
        let throttle = JoinThrottle::new(1, Duration::from_millis(50));
        assert!(throttle.check(7).await);
        assert!(!throttle.check(7).await);

        sleep(Duration::from_millis(80)).await;
        assert!(throttle.check(7).await);
    }

    #[tokio::test]
    async fn prune_forgets_idle_actors() {
        let throttle = JoinThrottle::new(1, Duration::from_millis(50));
        throttle.check(7).await;
        throttle.check(8).await;
        assert_eq!(throttle.tracked_actors().await, 2);

        sleep(Duration::from_millis(80)).await;
        throttle.prune().await;
        assert_eq!(throttle.tracked_actors().await, 0);
    }
}
