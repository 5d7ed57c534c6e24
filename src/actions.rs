use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::backend::BackendClient;
use crate::error::ConsoleError;
use crate::models::customer::Customer;
use crate::state::ConsoleState;

/// Operator "spawn customer" action: ask the backend for a fresh batch and
/// additively pin any customer the scene does not know yet. Nothing is ever
/// removed on this path.
pub async fn spawn_customers(
    state: &ConsoleState,
    backend: &BackendClient,
) -> Result<Vec<Customer>, ConsoleError> {
    let batch = backend.request_customers().await?;

    for customer in &batch {
        if state.scene.add_customer_pins(customer) {
            info!(customer_id = customer.id, customer = %customer.name, "customer spawned");
        }
    }

    Ok(batch)
}

#[derive(Debug, Serialize)]
pub struct PairingOutcome {
    pub customer: Customer,
    pub driver_name: String,
    pub ack: Value,
}

/// Operator "accept" action: relay the backend's own pairing decision back
/// to it as an assignment. The console does no matching of its own: it
/// submits the current fleet, resolves the returned driver index and binds
/// the chosen customer to that driver by name.
pub async fn accept_pairing(backend: &BackendClient) -> Result<PairingOutcome, ConsoleError> {
    let drivers = backend.drivers().await?;
    let decision = backend.pairing(&drivers).await?;

    let driver = drivers.get(decision.ideal_driver).ok_or_else(|| {
        ConsoleError::Malformed(format!(
            "pairing picked driver index {} out of {} drivers",
            decision.ideal_driver,
            drivers.len()
        ))
    })?;

    let ack = backend
        .assign_customer(&decision.current_customer, &driver.name)
        .await?;

    info!(
        driver = %driver.name,
        customer_id = decision.current_customer.id,
        "assignment submitted"
    );

    Ok(PairingOutcome {
        customer: decision.current_customer,
        driver_name: driver.name.clone(),
        ack,
    })
}
