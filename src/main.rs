mod actions;
mod api;
mod backend;
mod config;
mod error;
mod geo;
mod models;
mod notify;
mod observability;
mod panel;
mod reconcile;
mod scene;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ApiContext;
use crate::backend::BackendClient;
use crate::state::ConsoleState;

#[tokio::main]
async fn main() -> Result<(), error::ConsoleError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let state = Arc::new(ConsoleState::new(
        config.notification_log_size,
        config.event_buffer_size,
    ));
    let backend = Arc::new(BackendClient::new(
        &config.backend_url,
        config.request_timeout_ms,
    )?);

    // One-shot grid/driver initialization; a failure is logged, not retried.
    match backend.set_grid().await {
        Ok(()) => tracing::info!("grid initialized"),
        Err(err) => tracing::error!(error = %err, "failed to initialize grid"),
    }

    // Customers already waiting when the console comes up get their pins
    // before the first tick.
    match backend.customer_queue().await {
        Ok(queue) => {
            for customer in &queue {
                state.scene.add_customer_pins(customer);
            }
            reconcile::queue::apply_queue_snapshot(&state, &queue);
        }
        Err(err) => tracing::warn!(error = %err, "initial customer queue fetch failed"),
    }

    let driver_loop = tokio::spawn(reconcile::run_driver_loop(
        state.clone(),
        backend.clone(),
        config.driver_poll_ms,
    ));
    let queue_loop = tokio::spawn(reconcile::run_queue_loop(
        state.clone(),
        backend.clone(),
        config.queue_poll_ms,
    ));

    let context = Arc::new(ApiContext {
        state: state.clone(),
        backend,
    });
    let app = api::router(context);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| error::ConsoleError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "operator api started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| error::ConsoleError::Internal(format!("server error: {err}")))?;

    driver_loop.abort();
    queue_loop.abort();
    state.teardown();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
