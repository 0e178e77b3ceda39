use std::sync::Arc;

use crate::bridge::{DocumentSurface, SafariYetuBridge};
use safiri_session::BookingSessionCoordinator;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<BookingSessionCoordinator>,
    pub bridge: Arc<SafariYetuBridge>,
    pub surface: Arc<DocumentSurface>,
}
