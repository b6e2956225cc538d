//! Outbound notification delivery.
//!
//! Delivery is advisory: the target page may have navigated away or have no
//! message listener. The contract for every sender in this crate is
//! fire-and-forget - failures are logged, never retried, never propagated.
//! Trigger events have no reply channel to surface an error on anyway.

use async_trait::async_trait;
use protocol::{OutboundNotification, TabId};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no message listener in tab {0}")]
    NoReceiver(TabId),

    #[error("tab {0} has gone away")]
    TargetGone(TabId),
}

/// Capability to push a notification into a tab's content script.
///
/// The host adapter implements this over the real runtime messaging API.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        target: TabId,
        notification: OutboundNotification,
    ) -> Result<(), NotifyError>;
}

/// Send `notification` to `target`, demoting any delivery failure to a log
/// line. This is the only way listeners in this crate send.
pub async fn send_best_effort(
    notifier: &dyn Notifier,
    target: TabId,
    notification: OutboundNotification,
) {
    let name = notification.name.clone();
    if let Err(err) = notifier.send(target, notification).await {
        tracing::debug!("could not send {name} to tab {target}: {err}");
    }
}

/// In-memory notifier that records every delivery. Used by the test suite
/// and as a stand-in before a real host adapter is attached; individual tabs
/// can be marked as failing to exercise the log-only error path.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(TabId, OutboundNotification)>>,
    failing: Mutex<Vec<TabId>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make deliveries to `target` fail with [`NotifyError::NoReceiver`].
    pub async fn fail_for(&self, target: TabId) {
        self.failing.lock().await.push(target);
    }

    /// Every successfully delivered `(target, notification)` pair, in order.
    pub async fn sent(&self) -> Vec<(TabId, OutboundNotification)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        target: TabId,
        notification: OutboundNotification,
    ) -> Result<(), NotifyError> {
        if self.failing.lock().await.contains(&target) {
            return Err(NotifyError::NoReceiver(target));
        }
        self.sent.lock().await.push((target, notification));
        Ok(())
    }
}
