//! Host events consumed by the background core.
//!
//! Design: typed events, no stringly-typed callback names. The real browser
//! glue maps runtime callbacks onto these variants; the core never talks to
//! the extension APIs directly, which keeps every listener testable with
//! synthetic events.

use protocol::TabId;
use serde::{Deserialize, Serialize};

/// A lifecycle or trigger event observed by the host runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HostEvent {
    /// A declarative-net-request rule matched a request URL. This is the
    /// fill trigger candidate; most matches turn out to be non-fill traffic.
    RuleMatched { target: TabId, url: String },

    /// A network request finished for `target`. Only top-level (main frame)
    /// completions count toward fill completion.
    RequestCompleted { target: TabId, top_level: bool },

    /// A tab finished loading.
    PageLoadComplete { target: TabId, url: String },

    /// The toolbar action was clicked. `url` is absent on restricted pages.
    ActionClicked { target: TabId, url: Option<String> },

    /// The extension's context menu entry was clicked.
    ContextMenuClicked {
        target: TabId,
        page_url: Option<String>,
    },
}

impl HostEvent {
    /// The tab this event concerns.
    pub fn target(&self) -> TabId {
        match self {
            Self::RuleMatched { target, .. }
            | Self::RequestCompleted { target, .. }
            | Self::PageLoadComplete { target, .. }
            | Self::ActionClicked { target, .. }
            | Self::ContextMenuClicked { target, .. } => *target,
        }
    }
}
