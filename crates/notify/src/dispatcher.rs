//! Fans notifications out to configured channels.
//!
//! Delivery is strictly best-effort: individual channel failures are
//! logged and never propagated, so a dead webhook cannot change the
//! outcome of the run being reported.

use crate::traits::{Notification, Notifier};

/// Dispatches one notification to every configured channel.
pub struct Dispatcher {
    channels: Vec<Box<dyn Notifier>>,
}

impl Dispatcher {
    pub fn new(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self { channels }
    }

    /// Create a dispatcher with no channels; dispatch becomes a
    /// logged no-op.
    pub fn empty() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Deliver to all channels sequentially, logging each result.
    /// Returns the number of successful deliveries.
    pub async fn dispatch(&self, notification: &Notification) -> usize {
        if self.channels.is_empty() {
            tracing::debug!("No notification channels configured");
            return 0;
        }

        let mut delivered = 0;
        for channel in &self.channels {
            let start = std::time::Instant::now();
            let result = channel.send(notification).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(()) => {
                    tracing::info!(
                        channel = channel.channel_name(),
                        duration_ms,
                        "Notification delivered"
                    );
                    delivered += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        channel = channel.channel_name(),
                        error = %e,
                        duration_ms,
                        "Notification delivery failed"
                    );
                }
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{NotifyError, Severity};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct RecordingNotifier {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, _notification: &Notification) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotifyError::Rejected("boom".to_string()))
            } else {
                Ok(())
            }
        }

        fn channel_name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn empty_dispatcher_is_a_no_op() {
        let dispatcher = Dispatcher::empty();
        let n = Notification::info("subject", "body");
        assert_eq!(dispatcher.dispatch(&n).await, 0);
    }

    #[tokio::test]
    async fn failing_channel_does_not_block_others() {
        let failing_calls = Arc::new(AtomicUsize::new(0));
        let ok_calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new(vec![
            Box::new(RecordingNotifier {
                calls: failing_calls.clone(),
                fail: true,
            }),
            Box::new(RecordingNotifier {
                calls: ok_calls.clone(),
                fail: false,
            }),
        ]);

        let n = Notification::error("subject", "body");
        let delivered = dispatcher.dispatch(&n).await;

        assert_eq!(delivered, 1);
        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ok_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn severity_survives_to_channel() {
        struct AssertSeverity;
        #[async_trait::async_trait]
        impl Notifier for AssertSeverity {
            async fn send(&self, n: &Notification) -> Result<(), NotifyError> {
                assert_eq!(n.severity, Severity::Error);
                Ok(())
            }
            fn channel_name(&self) -> &str {
                "assert"
            }
        }

        let dispatcher = Dispatcher::new(vec![Box::new(AssertSeverity)]);
        let n = Notification::error("failed", "wget exited 8");
        assert_eq!(dispatcher.dispatch(&n).await, 1);
    }
}
