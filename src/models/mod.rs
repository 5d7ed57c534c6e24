pub mod customer;
pub mod driver;
pub mod pairing;

use serde::{Deserialize, Serialize};

/// A point on the map. The backend speaks `lat`/`lon` everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}
