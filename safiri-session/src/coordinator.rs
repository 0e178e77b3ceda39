use crate::monitor::{spawn_presence_monitor, MonitorConfig};
use crate::signals::SessionSignals;
use safiri_core::{BookingWidget, CloseCallback, LockSlot, ScrollLockManager, ScrollSurface};
use safiri_core::validate::{validate_search, ValidationError};
use safiri_shared::RawSearchInput;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Surfaced failures of a submit attempt. Everything else that goes wrong
/// after the widget has been invoked is treated as a user-closed dialog and
/// stays silent.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The widget script has not loaded yet; transient, worth retrying.
    #[error("Booking widget is not available yet")]
    WidgetUnavailable,
}

impl SubmitError {
    /// Translation key for the message shown to the traveller.
    pub fn message_key(&self) -> &'static str {
        match self {
            SubmitError::Validation(err) => err.message_key(),
            SubmitError::WidgetUnavailable => "loadingError",
        }
    }
}

/// Which path ended the session. Logged only; the effect is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Callback,
    MonitorDetected,
    InvocationFailed,
}

/// One ephemeral booking session's teardown, consumed exactly once.
///
/// The close callback, the presence monitor and the invocation error path
/// all race into `resolve`; the consumed flag plus the inert lock manager
/// make whichever fires first win and every later firing a no-op.
pub struct SessionResolver {
    session_id: Uuid,
    manager: Arc<ScrollLockManager>,
    slot: Arc<LockSlot>,
    signals: SessionSignals,
    consumed: AtomicBool,
}

impl SessionResolver {
    pub(crate) fn is_resolved(&self) -> bool {
        self.consumed.load(Ordering::SeqCst)
    }

    pub(crate) fn resolve(&self, reason: CloseReason) {
        if self.consumed.swap(true, Ordering::SeqCst) {
            debug!(session_id = %self.session_id, ?reason, "Session already resolved, ignoring");
            return;
        }
        // A newer submit may already have disposed this manager through the
        // slot; in that case only bookkeeping remains and the UI signals
        // belong to the newer session.
        let superseded = self.manager.is_disposed();
        self.manager.cleanup();
        self.slot.release(&self.manager);
        if superseded {
            debug!(session_id = %self.session_id, ?reason, "Session superseded, skipping signal reset");
            return;
        }
        self.signals.end_session();
        match reason {
            CloseReason::MonitorDetected => {
                warn!(session_id = %self.session_id, "Widget closed without callback, detected by monitor")
            }
            _ => info!(session_id = %self.session_id, ?reason, "Booking session resolved"),
        }
    }
}

/// Drives one booking attempt from raw form input to resolution.
///
/// Owns the process-wide lock slot: starting a new submit while a previous
/// session is still open forces the old manager's cleanup before a new one
/// is created, so at most one scroll lock is ever applied.
pub struct BookingSessionCoordinator {
    widget: Arc<dyn BookingWidget>,
    surface: Arc<dyn ScrollSurface>,
    slot: Arc<LockSlot>,
    signals: SessionSignals,
    monitor: MonitorConfig,
}

impl BookingSessionCoordinator {
    pub fn new(
        widget: Arc<dyn BookingWidget>,
        surface: Arc<dyn ScrollSurface>,
        monitor: MonitorConfig,
    ) -> Self {
        Self {
            widget,
            surface,
            slot: Arc::new(LockSlot::new()),
            signals: SessionSignals::new(),
            monitor,
        }
    }

    pub fn signals(&self) -> &SessionSignals {
        &self.signals
    }

    pub fn lock_slot(&self) -> &Arc<LockSlot> {
        &self.slot
    }

    /// Validate the raw input and hand the trip to the booking widget.
    ///
    /// Validation failures surface the first violated rule and touch no
    /// lock or dialog state. Widget unavailability rolls the session back
    /// entirely. Invocation failures are indistinguishable from a closed
    /// dialog and reset silently.
    pub async fn submit(&self, raw: RawSearchInput) -> Result<(), SubmitError> {
        let today = chrono::Local::now().date_naive();
        let request = match validate_search(&raw, today) {
            Ok(request) => request,
            Err(err) => {
                self.signals.set_error(err.message_key());
                return Err(err.into());
            }
        };

        let session_id = Uuid::new_v4();
        info!(session_id = %session_id, origin = %request.origin,
            destination = %request.destination, "Opening booking session");

        // Any manager still held by an earlier session is cleaned up here,
        // before the fresh one takes the slot.
        let manager = Arc::new(ScrollLockManager::new(self.surface.clone()));
        self.slot.replace(manager.clone());
        self.signals.begin_session();
        manager.disable_scroll();

        if !self.widget.is_available() {
            manager.cleanup();
            self.slot.release(&manager);
            self.signals.end_session();
            self.signals.set_error(SubmitError::WidgetUnavailable.message_key());
            warn!(session_id = %session_id, "Booking widget not loaded yet, rolled back");
            return Err(SubmitError::WidgetUnavailable);
        }

        let resolver = Arc::new(SessionResolver {
            session_id,
            manager,
            slot: self.slot.clone(),
            signals: self.signals.clone(),
            consumed: AtomicBool::new(false),
        });

        let callback_resolver = resolver.clone();
        let on_close: CloseCallback = Box::new(move || {
            callback_resolver.resolve(CloseReason::Callback);
        });

        match self.widget.open(&request, on_close).await {
            Ok(()) => {
                spawn_presence_monitor(self.widget.clone(), resolver, self.monitor.clone());
                Ok(())
            }
            Err(err) => {
                // Deliberately indistinguishable from the user closing the
                // dialog: reset silently, surface nothing.
                debug!(session_id = %session_id, error = %err, "Widget invocation failed, resetting silently");
                resolver.resolve(CloseReason::InvocationFailed);
                Ok(())
            }
        }
    }
}
