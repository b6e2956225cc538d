//! Extension Background Coordination Layer
//!
//! Mediates between host-browser lifecycle events and the per-page content
//! script: tracks the single in-flight fill session, routes inbound command
//! messages to named handlers, and pushes best-effort notifications back to
//! the page.
//!
//! The host runtime (tab management, navigation events, request inspection)
//! sits behind two seams: [`events::HostEvent`] on the way in and
//! [`notify::Notifier`] on the way out, so the core can be driven with
//! synthetic events and a recording notifier in tests.

pub mod commands;
pub mod events;
pub mod listener;
pub mod listeners;
pub mod notify;
pub mod router;
pub mod service;
pub mod session;

pub use events::HostEvent;
pub use listener::{EventListener, ListenerSet};
pub use listeners::{FillCompletion, FillTrigger, PageMarkers, SurfaceTrigger};
pub use notify::{Notifier, NotifyError, RecordingNotifier};
pub use router::{CommandHandler, CommandRouter};
pub use service::{BackgroundConfig, BackgroundService};
pub use session::SessionTracker;
