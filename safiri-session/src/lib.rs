pub mod coordinator;
pub mod monitor;
pub mod signals;

pub use coordinator::{BookingSessionCoordinator, CloseReason, SubmitError};
pub use monitor::MonitorConfig;
pub use signals::SessionSignals;
