//! Command routing - inbound messages to named handlers.
//!
//! Design decisions:
//! 1. Messages without a command are dropped, not answered
//! 2. Unknown commands get an error reply and a warning
//! 3. A handler produces exactly one reply; the router imposes no timeout

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use protocol::{CommandResult, InboundMessage};
use serde_json::Value;

/// A named command handler.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name this handler answers to.
    fn command(&self) -> &'static str;

    /// Handle one request. Must produce exactly one result; the router
    /// forwards it as the reply.
    async fn handle(&self, params: Value) -> CommandResult;
}

/// Routes inbound messages to their handlers.
///
/// Stateless per call; the only cross-call state in the system (the fill
/// session) is never touched from here.
pub struct CommandRouter {
    handlers: DashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Register a handler under its command name. A later registration for
    /// the same name replaces the earlier one.
    pub fn register(&self, handler: Arc<dyn CommandHandler>) {
        tracing::debug!("registered command handler: {}", handler.command());
        self.handlers.insert(handler.command().to_string(), handler);
    }

    /// Route `message` to its handler.
    ///
    /// `None` means no reply may be sent: the message had no command (or an
    /// empty one) and was dropped without invoking anything. `Some` carries
    /// the single reply, including the unknown-command error.
    pub async fn dispatch(&self, message: InboundMessage) -> Option<CommandResult> {
        let command = match message.command.as_deref() {
            Some(command) if !command.is_empty() => command,
            _ => return None,
        };

        // Clone the handler out so the map entry is not held across await.
        let handler = match self.handlers.get(command) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                tracing::warn!("unknown command: {command}");
                return Some(CommandResult::unknown_command());
            }
        };

        tracing::debug!("handling command: {command}");
        Some(handler.handle(message.params).await)
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}
