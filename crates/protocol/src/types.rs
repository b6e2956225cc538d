//! Core message types.
//!
//! Field names on the wire are camelCase to match what the content script
//! already speaks; constructors exist for every notification the core
//! produces so the shapes live in one place.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Host tab identifier
pub type TabId = i32;

/// Error text returned for commands no handler answers to.
pub const UNKNOWN_COMMAND: &str = "Unknown command";

/// A request from a content script or UI surface.
///
/// Messages without a `command` are never routed and never answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub params: Value,
}

impl InboundMessage {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            params: Value::Null,
        }
    }

    pub fn with_params(command: impl Into<String>, params: Value) -> Self {
        Self {
            command: Some(command.into()),
            params,
        }
    }
}

/// A message pushed to a content script.
///
/// Delivery is fire-and-forget: failures are logged by the sender, never
/// retried and never surfaced to whoever raised the triggering event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundNotification {
    pub name: String,
    pub message: Value,
}

impl OutboundNotification {
    /// Tell the content script to perform a fill. A missing vault selector
    /// is serialized as `null`, matching what the page expects.
    pub fn fill(fill_payload: &str, vault_selector: Option<&str>, url: &str) -> Self {
        Self {
            name: "handleOnePasswordFill".to_string(),
            message: json!({
                "onepasswdfill": fill_payload,
                "onepasswdvault": vault_selector,
                "url": url,
            }),
        }
    }

    pub fn toolbar_clicked(url: &str) -> Self {
        Self {
            name: "toolbarButtonClicked".to_string(),
            message: json!({ "url": url }),
        }
    }

    pub fn context_menu_clicked(url: &str) -> Self {
        Self {
            name: "contextMenuClicked".to_string(),
            message: json!({ "url": url }),
        }
    }

    pub fn welcome_page_loaded() -> Self {
        Self {
            name: "welcomePageLoaded".to_string(),
            message: json!({}),
        }
    }

    pub fn auth_page_loaded() -> Self {
        Self {
            name: "authPageLoaded".to_string(),
            message: json!({}),
        }
    }
}

/// The reply to an [`InboundMessage`].
///
/// Either a success shape (`{"success": true, ...command fields}`) or an
/// error shape (`{"error": "..."}`). Constructed fresh per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandResult {
    Success {
        success: bool,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Failure {
        error: String,
    },
}

impl CommandResult {
    pub fn ok() -> Self {
        Self::Success {
            success: true,
            extra: Map::new(),
        }
    }

    /// Success with command-specific fields alongside `success`.
    pub fn ok_with(extra: Map<String, Value>) -> Self {
        Self::Success {
            success: true,
            extra,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
        }
    }

    pub fn unknown_command() -> Self {
        Self::error(UNKNOWN_COMMAND)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { success: true, .. })
    }
}
