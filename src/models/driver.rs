use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::customer::Customer;
use crate::models::LatLon;

/// Waypoint on a driver's planned route. The backend attaches routing
/// metadata (neighbor tables, traffic flags) that the console has no use
/// for, so everything but the coordinates is dropped on decode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
}

/// One driver as reported by `/get-drivers`. Entirely owned by the backend;
/// the console only ever reads snapshots of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub has_customer: bool,
    #[serde(default)]
    pub on_pickup_leg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graph_path: Vec<Waypoint>,
    /// Target arrival timestamp for the current movement leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<f64>,
}

impl Driver {
    pub fn position(&self) -> LatLon {
        LatLon {
            lat: self.lat,
            lon: self.lon,
        }
    }

    /// The customer this driver is actually serving, if any. A zero-valued
    /// embedded customer (id 0) does not count.
    pub fn active_customer(&self) -> Option<&Customer> {
        if !self.has_customer {
            return None;
        }
        self.customer.as_ref().filter(|customer| customer.id != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::Driver;

    #[test]
    fn decodes_backend_camel_case_payload() {
        let raw = r#"{
            "name": "driver-1",
            "lat": 37.7616,
            "lon": -122.4232,
            "hasCustomer": true,
            "onPickupLeg": true,
            "customer": {
                "id": 7,
                "name": "Ada",
                "lat": 37.76,
                "lon": -122.42,
                "destinationLat": 37.77,
                "destinationLon": -122.43
            },
            "graphPath": [
                {"id": 1, "lat": 37.76, "lon": -122.42, "traffic_light": false},
                {"id": 2, "lat": 37.765, "lon": -122.425}
            ],
            "animationTime": "2024-05-01T12:00:01Z",
            "currentSpeed": 38.5,
            "resourceLeft": 12.0,
            "eta": 4.2
        }"#;

        let driver: Driver = serde_json::from_str(raw).unwrap();
        assert_eq!(driver.name, "driver-1");
        assert!(driver.has_customer);
        assert!(driver.on_pickup_leg);
        assert_eq!(driver.active_customer().unwrap().id, 7);
        assert_eq!(driver.graph_path.len(), 2);
        assert!(driver.animation_time.is_some());
    }

    #[test]
    fn zero_valued_customer_is_not_active() {
        let raw = r#"{
            "name": "driver-2",
            "lat": 0.0,
            "lon": 0.0,
            "hasCustomer": true,
            "onPickupLeg": false,
            "customer": {"id": 0, "name": "", "lat": 0, "lon": 0, "destinationLat": 0, "destinationLon": 0}
        }"#;

        let driver: Driver = serde_json::from_str(raw).unwrap();
        assert!(driver.active_customer().is_none());
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = r#"{"name": "driver-3", "lat": 1.0, "lon": 2.0}"#;

        let driver: Driver = serde_json::from_str(raw).unwrap();
        assert!(!driver.has_customer);
        assert!(driver.graph_path.is_empty());
        assert!(driver.animation_time.is_none());
        assert!(driver.eta.is_none());
    }
}
