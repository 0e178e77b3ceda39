use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use safiri_core::{BookingWidget, CloseCallback, ScrollSurface};
use safiri_shared::TripRequest;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::state::AppState;

/// Server-side stand-in for the script-injected SafariYetu global.
///
/// The hosting page reports the script's availability and the dialog's
/// presence markers over `/v1/widget/status`; the session engine reads them
/// through the `BookingWidget` contract. The close callback is stored and
/// fired when the page reports the dialog gone — best-effort, exactly like
/// the real widget: if the page never reports, the presence monitor is the
/// only closure signal.
pub struct SafariYetuBridge {
    available: AtomicBool,
    present: AtomicBool,
    on_close: Mutex<Option<CloseCallback>>,
}

impl SafariYetuBridge {
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(false),
            present: AtomicBool::new(false),
            on_close: Mutex::new(None),
        }
    }

    pub fn report_status(&self, available: bool, present: bool) {
        self.available.store(available, Ordering::SeqCst);
        let was_present = self.present.swap(present, Ordering::SeqCst);
        debug!(available, present, "Widget status reported by page");

        if was_present && !present {
            if let Some(on_close) = self.on_close.lock().unwrap().take() {
                info!("Widget dialog closed, firing close callback");
                on_close();
            }
        }
    }
}

impl Default for SafariYetuBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BookingWidget for SafariYetuBridge {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn dialog_present(&self) -> bool {
        self.present.load(Ordering::SeqCst)
    }

    async fn open(
        &self,
        request: &TripRequest,
        on_close: CloseCallback,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(origin = %request.origin, destination = %request.destination,
            date = %request.departure_date, passengers = request.passenger_count,
            "Handing trip request to SafariYetu");
        *self.on_close.lock().unwrap() = Some(on_close);
        // Assume the dialog mounts; the page's next status report corrects this.
        self.present.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Scroll-lock intent for the document. The page polls the session endpoint
/// and toggles its body styles to match.
pub struct DocumentSurface {
    locked: AtomicBool,
}

impl DocumentSurface {
    pub fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }
}

impl Default for DocumentSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSurface for DocumentSurface {
    fn apply_scroll_lock(&self) {
        self.locked.store(true, Ordering::SeqCst);
    }

    fn release_scroll_lock(&self) {
        self.locked.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Deserialize)]
pub struct WidgetStatusReport {
    pub available: bool,
    pub present: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/widget/status", post(report_widget_status))
}

async fn report_widget_status(
    State(state): State<AppState>,
    Json(report): Json<WidgetStatusReport>,
) -> StatusCode {
    state.bridge.report_status(report.available, report.present);
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_close_callback_fires_once_on_present_to_absent() {
        let bridge = SafariYetuBridge::new();
        bridge.report_status(true, true);

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let request = TripRequest {
            origin: "Arusha".to_string(),
            destination: "Mwanza".to_string(),
            departure_date: chrono::NaiveDate::from_ymd_opt(2099, 1, 15).unwrap(),
            passenger_count: 1,
        };
        bridge
            .open(
                &request,
                Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .await
            .unwrap();

        bridge.report_status(true, false);
        bridge.report_status(true, false);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!bridge.dialog_present());
    }

    #[tokio::test]
    async fn test_open_marks_dialog_present() {
        let bridge = SafariYetuBridge::new();
        bridge.report_status(true, false);
        let request = TripRequest {
            origin: "Arusha".to_string(),
            destination: "Mwanza".to_string(),
            departure_date: chrono::NaiveDate::from_ymd_opt(2099, 1, 15).unwrap(),
            passenger_count: 1,
        };
        bridge.open(&request, Box::new(|| {})).await.unwrap();
        assert!(bridge.dialog_present());
    }
}
