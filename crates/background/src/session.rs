//! Fill-session tracking.
//!
//! At most one fill is in flight per extension instance: triggers come from
//! a single global event stream, not per-tab. Starting a new session
//! overwrites the old one; there is no queue and no timeout. A session whose
//! page never completes stays active until the next trigger reclaims the
//! slot.

use protocol::TabId;
use tokio::sync::RwLock;

/// Tracks the single active fill session.
///
/// The slot is only mutated through these operations, each of which holds
/// the lock for its whole duration, so concurrent tasks see the operations
/// as atomic.
#[derive(Debug, Default)]
pub struct SessionTracker {
    current: RwLock<Option<TabId>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `target` as the active fill session, unconditionally replacing
    /// any prior session. Overwriting is not an error.
    pub async fn start(&self, target: TabId) {
        let mut current = self.current.write().await;
        if let Some(prev) = current.replace(target) {
            if prev != target {
                tracing::debug!("fill session for tab {prev} replaced by tab {target}");
            }
        }
    }

    /// True iff a session is active and belongs to `target`.
    pub async fn is_active_for(&self, target: TabId) -> bool {
        *self.current.read().await == Some(target)
    }

    /// Clear the session only if it is active for `target`, under one lock
    /// acquisition. Returns true when a session was cleared; a completion
    /// for a stale or unrelated tab is a no-op.
    pub async fn clear_if_active_for(&self, target: TabId) -> bool {
        let mut current = self.current.write().await;
        if *current == Some(target) {
            *current = None;
            true
        } else {
            false
        }
    }

    /// Clear the active session. No-op when nothing is active.
    pub async fn clear(&self) {
        self.current.write().await.take();
    }

    /// The currently active target, if any.
    pub async fn active(&self) -> Option<TabId> {
        *self.current.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_replaces_prior_session() {
        let tracker = SessionTracker::new();
        tracker.start(1).await;
        tracker.start(2).await;

        assert!(!tracker.is_active_for(1).await);
        assert!(tracker.is_active_for(2).await);
        assert_eq!(tracker.active().await, Some(2));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let tracker = SessionTracker::new();
        tracker.clear().await;
        tracker.start(7).await;
        tracker.clear().await;
        tracker.clear().await;

        assert_eq!(tracker.active().await, None);
    }

    #[tokio::test]
    async fn compare_and_clear_ignores_unrelated_target() {
        let tracker = SessionTracker::new();
        tracker.start(7).await;

        assert!(!tracker.clear_if_active_for(8).await);
        assert!(tracker.is_active_for(7).await);

        assert!(tracker.clear_if_active_for(7).await);
        assert_eq!(tracker.active().await, None);
        assert!(!tracker.clear_if_active_for(7).await);
    }
}
