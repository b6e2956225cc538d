//! Toolbar and context-menu triggers.
//!
//! Both surfaces unconditionally forward the click to the content script so
//! the page can open the extension UI. Events without a URL (restricted
//! pages, detached menus) are skipped.

use std::sync::Arc;

use async_trait::async_trait;
use protocol::OutboundNotification;

use crate::events::HostEvent;
use crate::listener::EventListener;
use crate::notify::{send_best_effort, Notifier};

pub struct SurfaceTrigger {
    notifier: Arc<dyn Notifier>,
}

impl SurfaceTrigger {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl EventListener for SurfaceTrigger {
    fn name(&self) -> &str {
        "surface-trigger"
    }

    async fn on_event(&self, event: &HostEvent) {
        match event {
            HostEvent::ActionClicked {
                target,
                url: Some(url),
            } => {
                tracing::debug!("toolbar button clicked for tab {target}");
                send_best_effort(
                    self.notifier.as_ref(),
                    *target,
                    OutboundNotification::toolbar_clicked(url),
                )
                .await;
            }
            HostEvent::ContextMenuClicked {
                target,
                page_url: Some(page_url),
            } => {
                tracing::debug!("context menu clicked for tab {target}");
                send_best_effort(
                    self.notifier.as_ref(),
                    *target,
                    OutboundNotification::context_menu_clicked(page_url),
                )
                .await;
            }
            _ => {}
        }
    }
}
