pub mod lock;
pub mod validate;
pub mod widget;

pub use lock::{LockSlot, ScrollLockManager, ScrollLockState, ScrollSurface};
pub use validate::{validate_search, ValidationError};
pub use widget::{BookingWidget, CloseCallback};
