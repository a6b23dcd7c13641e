//! Best-effort outcome notifications for dump runs.
//!
//! This crate provides:
//! - `Notifier` trait for pluggable notification channels
//! - Webhook notifier implementation
//! - Dispatcher that fans a message out to configured channels,
//!   swallowing delivery failures (a lost notification never fails
//!   the run that produced it)

pub mod dispatcher;
pub mod traits;
pub mod webhook;

pub use dispatcher::Dispatcher;
pub use traits::{Notification, Notifier, NotifyError, Severity};
pub use webhook::WebhookNotifier;
