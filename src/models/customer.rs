use serde::{Deserialize, Serialize};

use crate::models::LatLon;

/// A rider waiting for (or riding with) a driver.
///
/// The backend embeds this struct by value inside drivers, so an unassigned
/// driver carries a zero-valued customer with `id` 0. Anything keyed on a
/// customer must go through [`crate::models::driver::Driver::active_customer`]
/// rather than trusting the raw field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub destination_lat: f64,
    #[serde(default)]
    pub destination_lon: f64,
}

impl Customer {
    pub fn pickup(&self) -> LatLon {
        LatLon {
            lat: self.lat,
            lon: self.lon,
        }
    }

    pub fn destination(&self) -> LatLon {
        LatLon {
            lat: self.destination_lat,
            lon: self.destination_lon,
        }
    }
}

/// Envelope used by `/get-cust-que` and `/get-customer`.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerQueue {
    #[serde(default)]
    pub custque: Vec<Customer>,
}
