//! Wire Protocol - Message Types for the Extension Background Core
//!
//! This crate holds the types exchanged between the background core, the
//! host adapter and the per-page content script: inbound command messages,
//! outbound notifications and command results.
//!
//! Keep them minimal - add message shapes only when a handler needs them.

pub mod types;

pub use types::{CommandResult, InboundMessage, OutboundNotification, TabId, UNKNOWN_COMMAND};
