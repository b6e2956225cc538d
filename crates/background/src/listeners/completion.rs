//! Fill completion - ends the session when its navigation finishes.
//!
//! Only top-level completions for the session's own tab count; completions
//! for unrelated tabs must not clear an in-flight session elsewhere. No
//! notification is sent on completion, it only resets internal state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::HostEvent;
use crate::listener::EventListener;
use crate::session::SessionTracker;

pub struct FillCompletion {
    session: Arc<SessionTracker>,
}

impl FillCompletion {
    pub fn new(session: Arc<SessionTracker>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl EventListener for FillCompletion {
    fn name(&self) -> &str {
        "fill-completion"
    }

    async fn on_event(&self, event: &HostEvent) {
        let HostEvent::RequestCompleted { target, top_level } = event else {
            return;
        };
        if !top_level {
            return;
        }

        // Compare-and-clear makes a stale completion for an already
        // replaced session a no-op.
        if self.session.clear_if_active_for(*target).await {
            tracing::debug!("fill completion detected for tab {target}");
        }
    }
}
