use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::driver::Driver;
use crate::notify::TripEvent;
use crate::panel;
use crate::scene::leg_duration;
use crate::state::ConsoleState;

/// Apply one driver snapshot to the console state: markers, overlays,
/// phases, customer pins and the panel, in that order. Pure with respect to
/// time: ticks pass the wall clock, tests pass fixed instants.
pub fn apply_driver_snapshot(state: &ConsoleState, drivers: &[Driver], now: DateTime<Utc>) {
    sweep_vanished(state, drivers);

    state.assigned_customers.clear();

    for driver in drivers {
        reconcile_driver(state, driver, now);
    }

    *state.driver_panel.write().expect("driver panel poisoned") = panel::driver_rows(drivers);

    state.metrics.driver_markers.set(state.scene.driver_count() as i64);
}

/// Drivers absent from the snapshot lose their marker, overlay, phase and
/// tracking; a customer they were still holding goes with them.
fn sweep_vanished(state: &ConsoleState, drivers: &[Driver]) {
    let present: HashSet<&str> = drivers.iter().map(|d| d.name.as_str()).collect();
    let vanished: Vec<String> = state
        .scene
        .driver_names()
        .into_iter()
        .filter(|name| !present.contains(name.as_str()))
        .collect();

    for name in vanished {
        debug!(driver = %name, "driver left the snapshot");
        state.scene.remove_driver(&name);
        state.phases.remove(&name);
        if let Some((_, customer_id)) = state.last_customers.remove(&name) {
            state.scene.remove_customer_pins(customer_id);
        }
    }
}

fn reconcile_driver(state: &ConsoleState, driver: &Driver, now: DateTime<Utc>) {
    let duration = leg_duration(driver.animation_time, now);
    state
        .scene
        .upsert_driver(&driver.name, driver.position(), duration, now);
    state.scene.sync_overlay(&driver.name, &driver.graph_path);

    let event = state
        .phases
        .entry(driver.name.clone())
        .or_default()
        .observe(driver.has_customer, driver.on_pickup_leg);
    if let Some(event) = event {
        announce(state, driver, event, now);
    }

    if let Some(customer) = driver.active_customer() {
        state.assigned_customers.insert(customer.id);
        state.last_customers.insert(driver.name.clone(), customer.id);
        if state.scene.add_customer_pins(customer) {
            debug!(driver = %driver.name, customer_id = customer.id, "customer pins created");
        }
    }

    // Drop-off cleanup: the driver stopped holding the customer we last saw
    // it with.
    if !driver.has_customer {
        if let Some((_, customer_id)) = state.last_customers.remove(&driver.name) {
            state.scene.remove_customer_pins(customer_id);
            state.scene.remove_overlay(&driver.name);
        }
    }
}

fn announce(state: &ConsoleState, driver: &Driver, event: TripEvent, now: DateTime<Utc>) {
    // At drop-off the customer field may already be zeroed out.
    let customer_name = driver
        .customer
        .as_ref()
        .filter(|c| c.id != 0 && !c.name.is_empty())
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "customer".to_string());

    let message = match event {
        TripEvent::EnRoute => format!("{} en route to pick up {}", driver.name, customer_name),
        TripEvent::PickedUp => format!("{} picked up {}", driver.name, customer_name),
        TripEvent::DroppedOff => format!("{} dropped off {}", driver.name, customer_name),
    };

    state.notifier.push(&driver.name, event, message, now);
    state
        .metrics
        .notifications_total
        .with_label_values(&[event.as_str()])
        .inc();
}
