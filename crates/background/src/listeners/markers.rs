//! Marker-page notifications.
//!
//! A small static set of known URLs (the post-install welcome page and the
//! auth page) gets a dedicated notification when it finishes loading.
//! Everything else loads silently.

use std::sync::Arc;

use async_trait::async_trait;
use protocol::OutboundNotification;

use crate::events::HostEvent;
use crate::listener::EventListener;
use crate::notify::{send_best_effort, Notifier};
use crate::service::BackgroundConfig;

pub struct PageMarkers {
    config: Arc<BackgroundConfig>,
    notifier: Arc<dyn Notifier>,
}

impl PageMarkers {
    pub fn new(config: Arc<BackgroundConfig>, notifier: Arc<dyn Notifier>) -> Self {
        Self { config, notifier }
    }
}

#[async_trait]
impl EventListener for PageMarkers {
    fn name(&self) -> &str {
        "page-markers"
    }

    async fn on_event(&self, event: &HostEvent) {
        let HostEvent::PageLoadComplete { target, url } = event else {
            return;
        };

        // Exact match only, these are our own hosted pages.
        let notification = if *url == self.config.welcome_url {
            OutboundNotification::welcome_page_loaded()
        } else if *url == self.config.auth_url {
            OutboundNotification::auth_page_loaded()
        } else {
            return;
        };

        send_best_effort(self.notifier.as_ref(), *target, notification).await;
    }
}
