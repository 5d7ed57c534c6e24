use std::sync::RwLock;

use dashmap::{DashMap, DashSet};

use crate::notify::Notifier;
use crate::observability::metrics::Metrics;
use crate::panel::{DriverRow, QueueRow};
use crate::reconcile::phase::TripPhase;
use crate::scene::Scene;

/// Everything the console holds between ticks. Built once at startup and
/// shared by the two poll loops and the operator API.
pub struct ConsoleState {
    pub scene: Scene,
    /// Notification phase per driver name.
    pub phases: DashMap<String, TripPhase>,
    /// Last customer id each driver was seen holding; drop-off cleanup keys
    /// off this.
    pub last_customers: DashMap<String, i64>,
    /// Customer ids currently held by some driver, rebuilt every driver tick.
    pub assigned_customers: DashSet<i64>,
    pub driver_panel: RwLock<Vec<DriverRow>>,
    pub queue_panel: RwLock<Vec<QueueRow>>,
    pub notifier: Notifier,
    pub metrics: Metrics,
}

impl ConsoleState {
    pub fn new(notification_log_size: usize, event_buffer_size: usize) -> Self {
        Self {
            scene: Scene::new(),
            phases: DashMap::new(),
            last_customers: DashMap::new(),
            assigned_customers: DashSet::new(),
            driver_panel: RwLock::new(Vec::new()),
            queue_panel: RwLock::new(Vec::new()),
            notifier: Notifier::new(notification_log_size, event_buffer_size),
            metrics: Metrics::new(),
        }
    }

    /// Wholesale teardown; used on shutdown after the loops have stopped.
    pub fn teardown(&self) {
        self.scene.clear();
        self.phases.clear();
        self.last_customers.clear();
        self.assigned_customers.clear();
        self.driver_panel
            .write()
            .expect("driver panel poisoned")
            .clear();
        self.queue_panel
            .write()
            .expect("queue panel poisoned")
            .clear();
        self.notifier.clear();
    }
}
