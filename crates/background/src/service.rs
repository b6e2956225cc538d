//! Background service - wiring and event loop.
//!
//! This is the high-level API the host adapter interacts with: host events
//! go in through a channel, command replies come back from `dispatch`.
//! Owns the fill-session tracker, the listener set and the command router.

use std::sync::Arc;

use protocol::{CommandResult, InboundMessage};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::commands::{Autosave, FillItem, GetPageDetails, Hello};
use crate::events::HostEvent;
use crate::listener::ListenerSet;
use crate::listeners::{FillCompletion, FillTrigger, PageMarkers, SurfaceTrigger};
use crate::notify::Notifier;
use crate::router::CommandRouter;
use crate::session::SessionTracker;

/// Background configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    /// Extension version reported by the `hello` handshake.
    pub version: String,
    /// Substring that marks a URL as a fill trigger.
    pub fill_marker: String,
    /// Required query parameter carrying the fill payload.
    pub fill_param: String,
    /// Optional query parameter selecting a vault.
    pub vault_param: String,
    /// Exact URL of the post-install welcome page.
    pub welcome_url: String,
    /// Exact URL of the auth page.
    pub auth_url: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            version: "4.7.5.90".to_string(),
            fill_marker: "onepasswdfill".to_string(),
            fill_param: "onepasswdfill".to_string(),
            vault_param: "onepasswdvault".to_string(),
            welcome_url: "https://agilebits.com/browsers/welcome.html".to_string(),
            auth_url: "https://agilebits.com/browsers/auth.html".to_string(),
        }
    }
}

/// The background coordination core.
pub struct BackgroundService {
    pub config: Arc<BackgroundConfig>,
    session: Arc<SessionTracker>,
    listeners: ListenerSet,
    router: CommandRouter,
}

impl BackgroundService {
    /// Wire up the default listeners and command handlers.
    pub fn new(config: BackgroundConfig, notifier: Arc<dyn Notifier>) -> Self {
        let config = Arc::new(config);
        let session = Arc::new(SessionTracker::new());

        let mut listeners = ListenerSet::new();
        listeners.register(Box::new(FillTrigger::new(
            config.clone(),
            session.clone(),
            notifier.clone(),
        )));
        listeners.register(Box::new(FillCompletion::new(session.clone())));
        listeners.register(Box::new(SurfaceTrigger::new(notifier.clone())));
        listeners.register(Box::new(PageMarkers::new(config.clone(), notifier)));

        let router = CommandRouter::new();
        router.register(Arc::new(GetPageDetails));
        router.register(Arc::new(Autosave));
        router.register(Arc::new(FillItem));
        router.register(Arc::new(Hello::new(config.version.clone())));

        Self {
            config,
            session,
            listeners,
            router,
        }
    }

    /// Dispatch one host event to every listener.
    pub async fn handle_event(&self, event: HostEvent) {
        tracing::debug!("host event for tab {}", event.target());
        self.listeners.dispatch(Arc::new(event)).await;
    }

    /// Route an inbound command message. `None` means the message was
    /// unroutable and no reply may be sent.
    pub async fn dispatch(&self, message: InboundMessage) -> Option<CommandResult> {
        self.router.dispatch(message).await
    }

    /// The fill-session tracker.
    pub fn session(&self) -> &SessionTracker {
        &self.session
    }

    /// Consume host events in arrival order until the channel closes.
    ///
    /// One event is fully handled before the next is taken, so listeners
    /// observe events in the order the host delivered them. This is the
    /// seam the real browser glue feeds.
    pub async fn run(&self, mut events: mpsc::Receiver<HostEvent>) {
        tracing::info!("background service starting");
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        tracing::info!("background service stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use serde_json::json;

    fn service() -> (BackgroundService, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let service = BackgroundService::new(BackgroundConfig::default(), notifier.clone());
        (service, notifier)
    }

    #[tokio::test]
    async fn fill_trigger_scenario_end_to_end() {
        let (service, notifier) = service();
        let url = "https://x/onepasswdfill?onepasswdfill=abc123&onepasswdvault=v1";

        service
            .handle_event(HostEvent::RuleMatched {
                target: 7,
                url: url.to_string(),
            })
            .await;

        assert!(service.session().is_active_for(7).await);
        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 7);
        assert_eq!(sent[0].1.name, "handleOnePasswordFill");
        assert_eq!(
            sent[0].1.message,
            json!({
                "onepasswdfill": "abc123",
                "onepasswdvault": "v1",
                "url": url,
            })
        );

        service
            .handle_event(HostEvent::RequestCompleted {
                target: 7,
                top_level: true,
            })
            .await;

        assert_eq!(service.session().active().await, None);
    }

    #[tokio::test]
    async fn second_trigger_overwrites_first_session() {
        let (service, _notifier) = service();

        service
            .handle_event(HostEvent::RuleMatched {
                target: 1,
                url: "https://x/onepasswdfill?onepasswdfill=a".to_string(),
            })
            .await;
        service
            .handle_event(HostEvent::RuleMatched {
                target: 2,
                url: "https://x/onepasswdfill?onepasswdfill=b".to_string(),
            })
            .await;

        assert!(service.session().is_active_for(2).await);

        // A completion for the replaced session is a no-op.
        service
            .handle_event(HostEvent::RequestCompleted {
                target: 1,
                top_level: true,
            })
            .await;

        assert!(service.session().is_active_for(2).await);
    }

    #[tokio::test]
    async fn hello_handshake_reply() {
        let (service, _notifier) = service();

        let reply = service.dispatch(InboundMessage::new("hello")).await;

        assert_eq!(
            serde_json::to_value(reply.unwrap()).unwrap(),
            json!({
                "success": true,
                "version": "4.7.5.90",
                "capabilities": {
                    "declarativeNetRequest": true,
                    "serviceWorker": true,
                },
            })
        );
    }

    #[tokio::test]
    async fn all_default_commands_are_registered() {
        let (service, _notifier) = service();

        for command in ["getPageDetails", "autosave", "fillItem", "hello"] {
            let reply = service.dispatch(InboundMessage::new(command)).await;
            assert!(reply.unwrap().is_success(), "{command} should succeed");
        }
    }

    #[tokio::test]
    async fn unknown_and_missing_commands() {
        let (service, _notifier) = service();

        let reply = service.dispatch(InboundMessage::new("doesNotExist")).await;
        assert_eq!(
            serde_json::to_value(reply.unwrap()).unwrap(),
            json!({ "error": "Unknown command" })
        );

        let reply = service
            .dispatch(InboundMessage {
                command: None,
                params: json!({}),
            })
            .await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn run_drains_events_in_order() {
        let (service, notifier) = service();
        let (tx, rx) = mpsc::channel(8);

        tx.send(HostEvent::RuleMatched {
            target: 7,
            url: "https://x/onepasswdfill?onepasswdfill=abc".to_string(),
        })
        .await
        .unwrap();
        tx.send(HostEvent::PageLoadComplete {
            target: 2,
            url: "https://agilebits.com/browsers/welcome.html".to_string(),
        })
        .await
        .unwrap();
        tx.send(HostEvent::RequestCompleted {
            target: 7,
            top_level: true,
        })
        .await
        .unwrap();
        drop(tx);

        service.run(rx).await;

        assert_eq!(service.session().active().await, None);
        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].1.name, "handleOnePasswordFill");
        assert_eq!(sent[1].1.name, "welcomePageLoaded");
    }
}
