use crate::coordinator::{CloseReason, SessionResolver};
use safiri_core::BookingWidget;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Timing knobs for the presence monitor. The initial delay gives the
/// widget time to mount its UI markers before absence means "closed".
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub initial_delay: Duration,
    pub poll_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Poll for the widget's UI markers and infer closure when they vanish.
///
/// The widget's own close callback is unreliable; this task is the backstop
/// that still releases the scroll lock when no callback ever fires. It stops
/// on its own once the session has been resolved by any path.
pub(crate) fn spawn_presence_monitor(
    widget: Arc<dyn BookingWidget>,
    resolver: Arc<SessionResolver>,
    config: MonitorConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        sleep(config.initial_delay).await;
        loop {
            if resolver.is_resolved() {
                break;
            }
            if !widget.dialog_present() {
                resolver.resolve(CloseReason::MonitorDetected);
                break;
            }
            sleep(config.poll_interval).await;
        }
    })
}
