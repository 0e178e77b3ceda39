use safiri_shared::UiSnapshot;
use std::sync::Arc;
use tokio::sync::watch;

/// Publisher for the three observable UI signals: `loading` (disables the
/// submit control), `dialog_open` (dimming overlay), `error_message`.
/// The form collaborator subscribes and reacts to every change.
#[derive(Clone)]
pub struct SessionSignals {
    tx: Arc<watch::Sender<UiSnapshot>>,
}

impl SessionSignals {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(UiSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> UiSnapshot {
        self.tx.borrow().clone()
    }

    /// Session entering its open phase: submit disabled, overlay shown,
    /// any stale error cleared.
    pub(crate) fn begin_session(&self) {
        self.tx.send_modify(|ui| {
            ui.loading = true;
            ui.dialog_open = true;
            ui.error_message.clear();
        });
    }

    /// Session resolved by any path: submit re-enabled, overlay removed.
    pub(crate) fn end_session(&self) {
        self.tx.send_modify(|ui| {
            ui.loading = false;
            ui.dialog_open = false;
        });
    }

    pub(crate) fn set_error(&self, message: &str) {
        self.tx.send_modify(|ui| {
            ui.error_message = message.to_string();
        });
    }
}

impl Default for SessionSignals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_session_clears_previous_error() {
        let signals = SessionSignals::new();
        signals.set_error("loadingError");
        signals.begin_session();

        let ui = signals.snapshot();
        assert!(ui.loading);
        assert!(ui.dialog_open);
        assert!(ui.error_message.is_empty());
    }

    #[test]
    fn test_end_session_keeps_error_message() {
        let signals = SessionSignals::new();
        signals.begin_session();
        signals.end_session();
        signals.set_error("loadingError");

        let ui = signals.snapshot();
        assert!(!ui.loading);
        assert!(!ui.dialog_open);
        assert_eq!(ui.error_message, "loadingError");
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let signals = SessionSignals::new();
        let rx = signals.subscribe();
        signals.begin_session();
        assert!(rx.borrow().loading);
    }
}
