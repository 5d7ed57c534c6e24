use serde::Serialize;

use crate::models::customer::Customer;
use crate::models::driver::Driver;
use crate::models::LatLon;

/// Display status for the driver side panel. Derived fresh from every
/// snapshot and independent of the notification phase machine; the two can
/// disagree mid-trip (the panel says `busy` while the phase sits in
/// `pickup`), and both readings are kept on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Idle,
    Enroute,
    Busy,
    Offline,
}

impl DisplayStatus {
    /// Fixed ordering for stable visual grouping in the panel.
    pub fn priority(self) -> u8 {
        match self {
            DisplayStatus::Idle => 0,
            DisplayStatus::Enroute => 1,
            DisplayStatus::Busy => 2,
            DisplayStatus::Offline => 3,
        }
    }

    fn of(driver: &Driver) -> Self {
        if !driver.has_customer {
            DisplayStatus::Idle
        } else if driver.on_pickup_leg {
            DisplayStatus::Enroute
        } else {
            DisplayStatus::Busy
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverRow {
    pub name: String,
    pub status: DisplayStatus,
    pub task: String,
    pub position: LatLon,
    pub eta_minutes: Option<i64>,
    pub fuel_litres: Option<f64>,
    pub speed_kmh: Option<f64>,
}

impl DriverRow {
    fn of(driver: &Driver) -> Self {
        let status = DisplayStatus::of(driver);
        let task = match (status, driver.active_customer()) {
            (DisplayStatus::Enroute, Some(customer)) => format!("Picking up {}", customer.name),
            (DisplayStatus::Busy, Some(customer)) => format!("Dropping off {}", customer.name),
            _ => "Available".to_string(),
        };

        Self {
            name: driver.name.clone(),
            status,
            task,
            position: driver.position(),
            eta_minutes: driver.eta.filter(|m| *m > 0.0).map(|m| m.round() as i64),
            fuel_litres: driver.resource_left,
            speed_kmh: driver.current_speed.filter(|s| *s > 0.0),
        }
    }
}

/// Rows for every driver in the snapshot, grouped by status priority. The
/// sort is stable, so drivers keep their snapshot order within a group.
pub fn driver_rows(drivers: &[Driver]) -> Vec<DriverRow> {
    let mut rows: Vec<DriverRow> = drivers.iter().map(DriverRow::of).collect();
    rows.sort_by_key(|row| row.status.priority());
    rows
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueRow {
    pub id: i64,
    pub name: String,
    pub pickup: LatLon,
    pub destination: LatLon,
}

pub fn queue_rows(customers: &[Customer]) -> Vec<QueueRow> {
    customers
        .iter()
        .map(|customer| QueueRow {
            id: customer.id,
            name: customer.name.clone(),
            pickup: customer.pickup(),
            destination: customer.destination(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{driver_rows, DisplayStatus};
    use crate::models::customer::Customer;
    use crate::models::driver::Driver;

    fn driver(name: &str, has_customer: bool, on_pickup_leg: bool) -> Driver {
        Driver {
            name: name.to_string(),
            lat: 37.76,
            lon: -122.42,
            has_customer,
            on_pickup_leg,
            customer: has_customer.then(|| Customer {
                id: 9,
                name: "Ada".to_string(),
                lat: 37.76,
                lon: -122.42,
                destination_lat: 37.77,
                destination_lon: -122.43,
            }),
            graph_path: Vec::new(),
            animation_time: None,
            current_speed: Some(32.0),
            resource_left: Some(18.0),
            eta: Some(6.4),
        }
    }

    #[test]
    fn status_is_derived_from_snapshot_flags() {
        let rows = driver_rows(&[driver("a", false, false)]);
        assert_eq!(rows[0].status, DisplayStatus::Idle);
        assert_eq!(rows[0].task, "Available");

        let rows = driver_rows(&[driver("a", true, true)]);
        assert_eq!(rows[0].status, DisplayStatus::Enroute);
        assert_eq!(rows[0].task, "Picking up Ada");

        let rows = driver_rows(&[driver("a", true, false)]);
        assert_eq!(rows[0].status, DisplayStatus::Busy);
        assert_eq!(rows[0].task, "Dropping off Ada");
    }

    #[test]
    fn rows_group_by_status_priority() {
        let rows = driver_rows(&[
            driver("dropping", true, false),
            driver("idle", false, false),
            driver("picking", true, true),
        ]);

        let order: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(order, vec!["idle", "picking", "dropping"]);
    }

    #[test]
    fn zero_speed_and_eta_render_as_absent() {
        let mut d = driver("a", false, false);
        d.current_speed = Some(0.0);
        d.eta = Some(0.0);

        let rows = driver_rows(&[d]);
        assert!(rows[0].speed_kmh.is_none());
        assert!(rows[0].eta_minutes.is_none());
        assert_eq!(rows[0].fuel_litres, Some(18.0));
    }

    #[test]
    fn offline_sorts_last() {
        assert!(DisplayStatus::Offline.priority() > DisplayStatus::Busy.priority());
    }
}
