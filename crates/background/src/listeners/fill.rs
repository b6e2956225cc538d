//! Fill trigger - starts a fill session from a matched request URL.
//!
//! Responsibilities:
//! - Recognize fill URLs among rule-match events (marker substring)
//! - Extract the fill payload and optional vault selector from the query
//! - Record the event's target as the active fill session
//! - Notify the content script exactly once per matching event

use std::sync::Arc;

use async_trait::async_trait;
use protocol::OutboundNotification;
use url::Url;

use crate::events::HostEvent;
use crate::listener::EventListener;
use crate::notify::{send_best_effort, Notifier};
use crate::service::BackgroundConfig;
use crate::session::SessionTracker;

pub struct FillTrigger {
    config: Arc<BackgroundConfig>,
    session: Arc<SessionTracker>,
    notifier: Arc<dyn Notifier>,
}

impl FillTrigger {
    pub fn new(
        config: Arc<BackgroundConfig>,
        session: Arc<SessionTracker>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            session,
            notifier,
        }
    }

    /// Extract `(fill payload, vault selector)` from a trigger URL.
    ///
    /// Returns `None` for non-matching traffic: no marker substring, an
    /// unparseable URL, or an absent/empty fill parameter. `None` is not an
    /// error, just a request the extension has no business with.
    fn extract_params(&self, raw: &str) -> Option<(String, Option<String>)> {
        if !raw.contains(&self.config.fill_marker) {
            return None;
        }
        let url = Url::parse(raw).ok()?;

        let mut fill = None;
        let mut vault = None;
        for (key, value) in url.query_pairs() {
            if key == self.config.fill_param.as_str() {
                fill = Some(value.into_owned());
            } else if key == self.config.vault_param.as_str() {
                vault = Some(value.into_owned());
            }
        }

        match fill {
            Some(payload) if !payload.is_empty() => Some((payload, vault)),
            _ => None,
        }
    }
}

#[async_trait]
impl EventListener for FillTrigger {
    fn name(&self) -> &str {
        "fill-trigger"
    }

    async fn on_event(&self, event: &HostEvent) {
        let HostEvent::RuleMatched { target, url } = event else {
            return;
        };
        let Some((payload, vault)) = self.extract_params(url) else {
            return;
        };

        tracing::debug!("processing fill URL for tab {target}: {url}");
        self.session.start(*target).await;

        let notification = OutboundNotification::fill(&payload, vault.as_deref(), url);
        send_best_effort(self.notifier.as_ref(), *target, notification).await;
    }
}
