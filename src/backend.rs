use std::time::Duration;

use serde_json::{json, Value};
use tracing::warn;

use crate::error::ConsoleError;
use crate::models::customer::{Customer, CustomerQueue};
use crate::models::driver::Driver;
use crate::models::pairing::PairingDecision;

/// Typed client for the dispatch simulation backend. The backend owns all
/// business state; beyond the two operator actions the console only ever
/// reads from it.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, ConsoleError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|err| ConsoleError::Internal(format!("http client init failed: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// One-shot grid/driver initialization. A non-2xx answer surfaces as an
    /// error for the caller to log; it is never retried.
    pub async fn set_grid(&self) -> Result<(), ConsoleError> {
        let response = self
            .http
            .post(self.url("/set-grid"))
            .json(&json!({}))
            .send()
            .await?;
        response.error_for_status()?;
        Ok(())
    }

    /// Current driver fleet. A malformed element is skipped with a warning
    /// instead of failing the whole tick.
    pub async fn drivers(&self) -> Result<Vec<Driver>, ConsoleError> {
        let response = self.http.get(self.url("/get-drivers")).send().await?;
        let raw: Vec<Value> = response.error_for_status()?.json().await?;

        let mut drivers = Vec::with_capacity(raw.len());
        for element in raw {
            match serde_json::from_value::<Driver>(element) {
                Ok(driver) => drivers.push(driver),
                Err(err) => warn!(error = %err, "skipping malformed driver entry"),
            }
        }
        Ok(drivers)
    }

    /// Customers still waiting for assignment.
    pub async fn customer_queue(&self) -> Result<Vec<Customer>, ConsoleError> {
        let response = self
            .http
            .post(self.url("/get-cust-que"))
            .json(&json!({}))
            .send()
            .await?;
        let queue: CustomerQueue = response.error_for_status()?.json().await?;
        Ok(queue.custque)
    }

    /// Ask the backend to spawn fresh customers; returns the resulting batch.
    pub async fn request_customers(&self) -> Result<Vec<Customer>, ConsoleError> {
        let response = self
            .http
            .post(self.url("/get-customer"))
            .json(&json!({}))
            .send()
            .await?;
        let queue: CustomerQueue = response.error_for_status()?.json().await?;
        Ok(queue.custque)
    }

    /// The backend's pairing decision for the submitted fleet.
    pub async fn pairing(&self, drivers: &[Driver]) -> Result<PairingDecision, ConsoleError> {
        let response = self
            .http
            .post(self.url("/get-pairing"))
            .json(&json!({ "drivers": drivers }))
            .send()
            .await?;
        Ok(response.error_for_status()?.json().await?)
    }

    /// Bind a customer to a driver by name. The acknowledgement payload is
    /// backend-defined and passed through untouched.
    pub async fn assign_customer(
        &self,
        customer: &Customer,
        driver_name: &str,
    ) -> Result<Value, ConsoleError> {
        let response = self
            .http
            .post(self.url("/assign-customer"))
            .json(&json!({ "customer": customer, "driverName": driver_name }))
            .send()
            .await?;
        Ok(response.error_for_status()?.json().await?)
    }
}
