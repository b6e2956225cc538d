//! Event listeners - the lifecycle and trigger glue.
//!
//! Each listener is an independent translation from a host event to core
//! state changes and outbound notifications. Every listener sees every
//! event and decides for itself what is relevant; non-matching traffic is
//! ignored silently, not treated as an error.

use async_trait::async_trait;
use std::sync::Arc;

use crate::events::HostEvent;

/// A listener reacting to host events.
#[async_trait]
pub trait EventListener: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &str;

    /// Handle a host event.
    ///
    /// Called for every event. Listeners must never fail out of this; any
    /// recoverable problem degrades to a log line.
    async fn on_event(&self, event: &HostEvent);
}

/// Listener registry - dispatches each event to all listeners.
pub struct ListenerSet {
    listeners: Vec<Box<dyn EventListener>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn register(&mut self, listener: Box<dyn EventListener>) {
        tracing::debug!("registered listener: {}", listener.name());
        self.listeners.push(listener);
    }

    /// Dispatch one event to every listener concurrently, returning once
    /// all of them have finished with it.
    pub async fn dispatch(&self, event: Arc<HostEvent>) {
        use futures_util::future::join_all;

        let tasks: Vec<_> = self
            .listeners
            .iter()
            .map(|listener| {
                let event = event.clone();
                async move {
                    listener.on_event(&event).await;
                }
            })
            .collect();

        join_all(tasks).await;
    }
}

impl Default for ListenerSet {
    fn default() -> Self {
        Self::new()
    }
}
