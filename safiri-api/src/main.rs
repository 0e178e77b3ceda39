use std::net::SocketAddr;
use std::sync::Arc;

use safiri_api::{
    app,
    bridge::{DocumentSurface, SafariYetuBridge},
    AppState,
};
use safiri_session::BookingSessionCoordinator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safiri_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = safiri_api::app_config::Config::load().expect("Failed to load config");
    tracing::info!(
        "Starting Safiri booking API for widget '{}' on port {}",
        config.widget.display_name,
        config.server.port
    );

    let bridge = Arc::new(SafariYetuBridge::new());
    let surface = Arc::new(DocumentSurface::new());
    let coordinator = Arc::new(BookingSessionCoordinator::new(
        bridge.clone(),
        surface.clone(),
        config.monitor.to_monitor_config(),
    ));

    let app_state = AppState {
        coordinator,
        bridge,
        surface,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
