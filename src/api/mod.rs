pub mod operator;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::backend::BackendClient;
use crate::notify::Notification;
use crate::panel::{DriverRow, QueueRow};
use crate::state::ConsoleState;

/// Shared context for the operator surface: the console's own state plus
/// the backend that operator actions relay to.
pub struct ApiContext {
    pub state: Arc<ConsoleState>,
    pub backend: Arc<BackendClient>,
}

pub fn router(context: Arc<ApiContext>) -> Router {
    Router::new()
        .merge(operator::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/panel/drivers", get(driver_panel))
        .route("/panel/queue", get(queue_panel))
        .route("/notifications", get(notifications))
        .layer(CorsLayer::permissive())
        .with_state(context)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    drivers: usize,
    path_overlays: usize,
    customer_pins: usize,
    queued_customers: usize,
    notifications: usize,
}

async fn health(State(context): State<Arc<ApiContext>>) -> Json<HealthResponse> {
    let state = &context.state;
    Json(HealthResponse {
        status: "ok",
        drivers: state.scene.driver_count(),
        path_overlays: state.scene.overlay_count(),
        customer_pins: state.scene.customer_count(),
        queued_customers: state
            .queue_panel
            .read()
            .expect("queue panel poisoned")
            .len(),
        notifications: state.notifier.count(),
    })
}

async fn metrics(State(context): State<Arc<ApiContext>>) -> impl IntoResponse {
    match context.state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}

async fn driver_panel(State(context): State<Arc<ApiContext>>) -> Json<Vec<DriverRow>> {
    Json(
        context
            .state
            .driver_panel
            .read()
            .expect("driver panel poisoned")
            .clone(),
    )
}

async fn queue_panel(State(context): State<Arc<ApiContext>>) -> Json<Vec<QueueRow>> {
    Json(
        context
            .state
            .queue_panel
            .read()
            .expect("queue panel poisoned")
            .clone(),
    )
}

async fn notifications(State(context): State<Arc<ApiContext>>) -> Json<Vec<Notification>> {
    Json(context.state.notifier.entries())
}
