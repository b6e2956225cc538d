//! Built-in command handlers.
//!
//! These guarantee the reply shapes the content script expects. The actual
//! work lives in external collaborators - page analysis and field filling
//! in the content script, credential persistence in the vault - so the
//! handlers here answer for them without doing the work.

use async_trait::async_trait;
use protocol::CommandResult;
use serde_json::{json, Map, Value};

use crate::router::CommandHandler;

/// `getPageDetails` - page analysis happens in the content script; the
/// background only guarantees the reply shape.
pub struct GetPageDetails;

#[async_trait]
impl CommandHandler for GetPageDetails {
    fn command(&self) -> &'static str {
        "getPageDetails"
    }

    async fn handle(&self, _params: Value) -> CommandResult {
        tracing::debug!("getting page details");
        let mut extra = Map::new();
        extra.insert("pageDetails".to_string(), json!({}));
        CommandResult::ok_with(extra)
    }
}

/// `autosave` - saving login data belongs to the credential store.
pub struct Autosave;

#[async_trait]
impl CommandHandler for Autosave {
    fn command(&self) -> &'static str {
        "autosave"
    }

    async fn handle(&self, _params: Value) -> CommandResult {
        tracing::debug!("handling autosave");
        CommandResult::ok()
    }
}

/// `fillItem` - field filling happens in the content script.
pub struct FillItem;

#[async_trait]
impl CommandHandler for FillItem {
    fn command(&self) -> &'static str {
        "fillItem"
    }

    async fn handle(&self, _params: Value) -> CommandResult {
        tracing::debug!("handling fill item");
        CommandResult::ok()
    }
}

/// `hello` - capability handshake, no side effects.
pub struct Hello {
    version: String,
}

impl Hello {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for Hello {
    fn command(&self) -> &'static str {
        "hello"
    }

    async fn handle(&self, _params: Value) -> CommandResult {
        let mut extra = Map::new();
        extra.insert("version".to_string(), json!(self.version));
        extra.insert(
            "capabilities".to_string(),
            json!({
                "declarativeNetRequest": true,
                "serviceWorker": true,
            }),
        );
        CommandResult::ok_with(extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn page_details_reply_shape() {
        let reply = GetPageDetails.handle(Value::Null).await;
        assert_eq!(
            serde_json::to_value(reply).unwrap(),
            json!({ "success": true, "pageDetails": {} })
        );
    }

    #[tokio::test]
    async fn autosave_and_fill_item_always_succeed() {
        assert!(Autosave.handle(Value::Null).await.is_success());
        assert!(FillItem.handle(json!({ "item": "login" })).await.is_success());
    }

    #[tokio::test]
    async fn hello_reports_version_and_capabilities() {
        let reply = Hello::new("4.7.5.90").handle(Value::Null).await;
        assert_eq!(
            serde_json::to_value(reply).unwrap(),
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
}
