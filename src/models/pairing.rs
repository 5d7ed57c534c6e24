use serde::Deserialize;

use crate::models::customer::Customer;

/// The backend's answer to `/get-pairing`: which queued customer to serve
/// next and which driver should take them, as an index into the driver list
/// the console submitted with the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingDecision {
    pub current_customer: Customer,
    pub ideal_driver: usize,
}
