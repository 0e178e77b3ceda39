use std::sync::{Arc, Mutex};

/// Document-level scroll effect seam. The hosting page applies the real
/// effect (overflow/position styles); tests plug in counting fakes.
pub trait ScrollSurface: Send + Sync {
    fn apply_scroll_lock(&self);
    fn release_scroll_lock(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollLockState {
    Unlocked,
    Locked,
}

struct LockInner {
    state: ScrollLockState,
    disposed: bool,
}

/// Owns the scroll-disable/enable state for one booking session.
///
/// Lifecycle: `Unlocked` → `Locked` → `Unlocked`, then permanently inert
/// after `cleanup()`. Construction has no side effects on the surface, and
/// a disposed manager never re-enters `Locked`.
pub struct ScrollLockManager {
    surface: Arc<dyn ScrollSurface>,
    inner: Mutex<LockInner>,
}

impl ScrollLockManager {
    pub fn new(surface: Arc<dyn ScrollSurface>) -> Self {
        Self {
            surface,
            inner: Mutex::new(LockInner {
                state: ScrollLockState::Unlocked,
                disposed: false,
            }),
        }
    }

    pub fn state(&self) -> ScrollLockState {
        self.inner.lock().unwrap().state
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.lock().unwrap().disposed
    }

    /// Transition `Unlocked → Locked`. Idempotent while already `Locked`
    /// so a repeat call cannot double-apply the surface effect.
    pub fn disable_scroll(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.disposed || inner.state == ScrollLockState::Locked {
            return;
        }
        self.surface.apply_scroll_lock();
        inner.state = ScrollLockState::Locked;
        tracing::debug!("Scroll lock applied");
    }

    /// Transition `Locked → Unlocked`. Idempotent while already `Unlocked`.
    pub fn enable_scroll(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.disposed || inner.state == ScrollLockState::Unlocked {
            return;
        }
        self.surface.release_scroll_lock();
        inner.state = ScrollLockState::Unlocked;
        tracing::debug!("Scroll lock released");
    }

    /// Terminal operation: restores scrolling if still `Locked` and marks
    /// the instance inert. Every later call on this manager is a no-op.
    pub fn cleanup(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.disposed {
            return;
        }
        if inner.state == ScrollLockState::Locked {
            self.surface.release_scroll_lock();
            inner.state = ScrollLockState::Unlocked;
        }
        inner.disposed = true;
        tracing::debug!("Scroll lock manager disposed");
    }
}

/// Process-wide singleton slot for the active lock manager.
///
/// At most one manager may be `Locked` globally; the slot enforces this by
/// guaranteeing the previous handle's `cleanup()` before it is replaced.
pub struct LockSlot {
    active: Mutex<Option<Arc<ScrollLockManager>>>,
}

impl LockSlot {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
        }
    }

    /// Install a fresh manager, cleaning up any stale one from an earlier
    /// session first.
    pub fn replace(&self, manager: Arc<ScrollLockManager>) {
        let mut slot = self.active.lock().unwrap();
        if let Some(previous) = slot.take() {
            tracing::debug!("Cleaning up stale scroll lock manager");
            previous.cleanup();
        }
        *slot = Some(manager);
    }

    /// Clear the slot, but only if it still holds `manager` — a newer
    /// session may already have replaced it.
    pub fn release(&self, manager: &Arc<ScrollLockManager>) {
        let mut slot = self.active.lock().unwrap();
        if let Some(current) = slot.as_ref() {
            if Arc::ptr_eq(current, manager) {
                *slot = None;
            }
        }
    }

    pub fn active(&self) -> Option<Arc<ScrollLockManager>> {
        self.active.lock().unwrap().clone()
    }

    /// Number of slot-held managers currently in `Locked` state (0 or 1).
    pub fn locked_count(&self) -> usize {
        self.active
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.state() == ScrollLockState::Locked)
            .count()
    }
}

impl Default for LockSlot {
    fn default() -> Self {
        Self::new()
    }
}
