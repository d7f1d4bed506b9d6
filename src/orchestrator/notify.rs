use std::sync::Arc;

/// Callback fired once per completed, non-superseded translation cycle.
///
/// Hosts typically use it to reset their own "translate next capture" flag. It is
/// invoked from the player task and may call back into the orchestrator.
pub trait NotificationSink: Send + Sync {
    fn cycle_completed(&self);
}

impl<F> NotificationSink for F
where
    F: Fn() + Send + Sync,
{
    fn cycle_completed(&self) {
        self()
    }
}

/// Sink for hosts that don't need completion callbacks
pub fn silent() -> Arc<dyn NotificationSink> {
    Arc::new(|| {})
}
