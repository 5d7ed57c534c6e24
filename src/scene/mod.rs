mod animation;

pub use animation::{leg_duration, Tween, MIN_LEG_MS};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::geo;
use crate::models::customer::Customer;
use crate::models::driver::Waypoint;
use crate::models::LatLon;

/// A driver's on-map marker: tweened position plus icon heading.
#[derive(Debug, Clone)]
pub struct DriverMarker {
    tween: Tween,
    heading_deg: f64,
}

impl DriverMarker {
    fn new(at: LatLon, now: DateTime<Utc>) -> Self {
        Self {
            tween: Tween::fixed(at, now),
            heading_deg: 0.0,
        }
    }

    /// Animated position at `at`.
    pub fn position(&self, at: DateTime<Utc>) -> LatLon {
        self.tween.sample(at)
    }

    /// Where the current leg ends.
    pub fn target(&self) -> LatLon {
        self.tween.target()
    }

    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }
}

/// Pickup and destination pins for one assigned or queued customer.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerPins {
    pub pickup: LatLon,
    pub destination: LatLon,
}

/// Route overlay for one driver. `revision` moves only on visible change;
/// re-applying an identical path is a no-op.
#[derive(Debug, Clone)]
pub struct PathOverlay {
    points: Vec<LatLon>,
    revision: u64,
}

impl PathOverlay {
    pub fn points(&self) -> &[LatLon] {
        &self.points
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// In-process mirror of everything the dashboard draws, keyed by the stable
/// identities the backend reports: driver name and customer id. Entries are
/// only ever removed when the corresponding backend condition is observed,
/// never eagerly.
#[derive(Default)]
pub struct Scene {
    drivers: DashMap<String, DriverMarker>,
    overlays: DashMap<String, PathOverlay>,
    customers: DashMap<i64, CustomerPins>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn driver_marker(&self, name: &str) -> Option<DriverMarker> {
        self.drivers.get(name).map(|marker| marker.clone())
    }

    pub fn overlay(&self, name: &str) -> Option<PathOverlay> {
        self.overlays.get(name).map(|overlay| overlay.clone())
    }

    pub fn customer_pins(&self, id: i64) -> Option<CustomerPins> {
        self.customers.get(&id).map(|pins| pins.clone())
    }

    pub fn has_customer_pins(&self, id: i64) -> bool {
        self.customers.contains_key(&id)
    }

    pub fn driver_names(&self) -> Vec<String> {
        self.drivers.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Create the marker on first sight, retarget its tween afterwards.
    /// Heading only moves when the displacement is large enough to mean the
    /// driver actually travelled, and always by the shortest turn.
    pub fn upsert_driver(&self, name: &str, to: LatLon, duration: Duration, now: DateTime<Utc>) {
        let mut marker = self
            .drivers
            .entry(name.to_string())
            .or_insert_with(|| DriverMarker::new(to, now));

        let from = marker.tween.sample(now);
        marker.tween.retarget(to, duration, now);

        if geo::displacement(from, to) > geo::MOVE_EPSILON {
            let target = geo::icon_heading(from, to);
            marker.heading_deg += geo::shortest_turn(marker.heading_deg, target);
        }
    }

    /// Keep the overlay in sync with the driver's planned route: present iff
    /// the path still has more than one point. Returns whether anything
    /// visibly changed.
    pub fn sync_overlay(&self, name: &str, path: &[Waypoint]) -> bool {
        if path.len() > 1 {
            let points: Vec<LatLon> = path
                .iter()
                .map(|w| LatLon {
                    lat: w.lat,
                    lon: w.lon,
                })
                .collect();
            match self.overlays.get_mut(name) {
                Some(mut overlay) => {
                    if overlay.points == points {
                        return false;
                    }
                    overlay.points = points;
                    overlay.revision += 1;
                    true
                }
                None => {
                    self.overlays
                        .insert(name.to_string(), PathOverlay { points, revision: 0 });
                    true
                }
            }
        } else {
            self.overlays.remove(name).is_some()
        }
    }

    pub fn remove_overlay(&self, name: &str) -> bool {
        self.overlays.remove(name).is_some()
    }

    /// Idempotent: pins already on the map are left untouched.
    pub fn add_customer_pins(&self, customer: &Customer) -> bool {
        if self.customers.contains_key(&customer.id) {
            return false;
        }
        self.customers.insert(
            customer.id,
            CustomerPins {
                pickup: customer.pickup(),
                destination: customer.destination(),
            },
        );
        true
    }

    pub fn remove_customer_pins(&self, id: i64) -> bool {
        self.customers.remove(&id).is_some()
    }

    /// Remove a driver's marker and route overlay together.
    pub fn remove_driver(&self, name: &str) -> bool {
        let removed = self.drivers.remove(name).is_some();
        self.overlays.remove(name);
        removed
    }

    /// Wholesale teardown, used once at shutdown.
    pub fn clear(&self) {
        self.drivers.clear();
        self.overlays.clear();
        self.customers.clear();
    }
}
