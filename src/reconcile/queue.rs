use crate::models::customer::Customer;
use crate::panel;
use crate::state::ConsoleState;

/// Full-replace render of the waiting-customer panel. No identity is kept
/// across ticks for this panel; an empty snapshot leaves an empty panel.
/// Map pins for customers are managed by the driver loop, keyed by
/// assignment rather than queue membership.
pub fn apply_queue_snapshot(state: &ConsoleState, queue: &[Customer]) {
    *state.queue_panel.write().expect("queue panel poisoned") = panel::queue_rows(queue);
    state.metrics.queued_customers.set(queue.len() as i64);
}
