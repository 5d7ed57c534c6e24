use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;

use crate::actions::{self, PairingOutcome};
use crate::api::ApiContext;
use crate::error::ConsoleError;
use crate::models::customer::Customer;

pub fn router() -> Router<Arc<ApiContext>> {
    Router::new()
        .route("/operator/spawn-customer", post(spawn_customer))
        .route("/operator/pair", post(pair))
}

async fn spawn_customer(
    State(context): State<Arc<ApiContext>>,
) -> Result<Json<Vec<Customer>>, ConsoleError> {
    let spawned = actions::spawn_customers(&context.state, &context.backend).await?;
    Ok(Json(spawned))
}

async fn pair(State(context): State<Arc<ApiContext>>) -> Result<Json<PairingOutcome>, ConsoleError> {
    let outcome = actions::accept_pairing(&context.backend).await?;
    Ok(Json(outcome))
}
