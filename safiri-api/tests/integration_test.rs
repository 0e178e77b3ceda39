use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use safiri_api::bridge::{DocumentSurface, SafariYetuBridge};
use safiri_api::{app, AppState};
use safiri_session::{BookingSessionCoordinator, MonitorConfig};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_app() -> (axum::Router, AppState) {
    let bridge = Arc::new(SafariYetuBridge::new());
    let surface = Arc::new(DocumentSurface::new());
    let coordinator = Arc::new(BookingSessionCoordinator::new(
        bridge.clone(),
        surface.clone(),
        MonitorConfig {
            initial_delay: Duration::from_millis(20),
            poll_interval: Duration::from_millis(20),
        },
    ));
    let state = AppState {
        coordinator,
        bridge,
        surface,
    };
    (app(state.clone()), state)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_prefill_consumes_from_and_to() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/prefill?from=Arusha&to=Mwanza&utm_source=mail")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["from"], "Arusha");
    assert_eq!(body["to"], "Mwanza");
    assert_eq!(body["remaining_query"], "utm_source=mail");
}

#[tokio::test]
async fn test_search_validation_failure_returns_message_key() {
    let (app, _) = test_app();

    let response = app
        .oneshot(post_json("/v1/search", r#"{"from": "", "to": "Mwanza"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "selectDepartureError");
}

#[tokio::test]
async fn test_search_before_widget_loads_is_service_unavailable() {
    let (app, state) = test_app();

    let response = app
        .oneshot(post_json(
            "/v1/search",
            r#"{"from": "Arusha", "to": "Mwanza", "date": "2099-01-15", "passengers": "2"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["error"], "loadingError");

    // Full rollback: nothing left loading, scroll restored
    let ui = state.coordinator.signals().snapshot();
    assert!(!ui.loading);
    assert!(!ui.dialog_open);
    assert!(!state.surface.is_locked());
}

#[tokio::test]
async fn test_full_booking_flow_via_status_reports() {
    let (app, state) = test_app();

    // Page reports the widget script loaded
    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/widget/status",
            r#"{"available": true, "present": false}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Submit is accepted and the session opens
    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/search",
            r#"{"from": "Arusha", "to": "Mwanza", "date": "2099-01-15", "passengers": "2"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/v1/session").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["loading"], true);
    assert_eq!(body["dialog_open"], true);
    assert_eq!(body["scroll_locked"], true);

    // Page reports the dialog gone; close callback resolves the session
    app.clone()
        .oneshot(post_json(
            "/v1/widget/status",
            r#"{"available": true, "present": false}"#,
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/v1/session").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["loading"], false);
    assert_eq!(body["dialog_open"], false);
    assert_eq!(body["scroll_locked"], false);
    assert_eq!(body["error_message"], "");
}
