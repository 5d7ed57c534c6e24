pub mod driver;
pub mod phase;
pub mod queue;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::backend::BackendClient;
use crate::state::ConsoleState;

/// Driver reconciliation loop. The interval's delayed missed-tick behavior
/// plus the inline await is the in-flight guard: a new tick cannot start
/// while the previous fetch is unresolved, so reconciliation passes never
/// overlap or queue up behind a slow backend.
pub async fn run_driver_loop(
    state: Arc<ConsoleState>,
    backend: Arc<BackendClient>,
    period_ms: u64,
) {
    info!(period_ms, "driver reconciliation loop started");
    let mut ticker = interval(Duration::from_millis(period_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let start = Instant::now();
        match backend.drivers().await {
            Ok(drivers) => {
                driver::apply_driver_snapshot(&state, &drivers, Utc::now());
                observe_tick(&state, "drivers", "success", start);
            }
            Err(err) => {
                // A failed tick is a no-op: prior markers stay put.
                warn!(error = %err, "driver poll failed; keeping previous state");
                observe_tick(&state, "drivers", "error", start);
            }
        }
    }
}

/// Customer-queue loop, same guard and failure policy at a faster cadence.
pub async fn run_queue_loop(
    state: Arc<ConsoleState>,
    backend: Arc<BackendClient>,
    period_ms: u64,
) {
    info!(period_ms, "customer queue loop started");
    let mut ticker = interval(Duration::from_millis(period_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let start = Instant::now();
        match backend.customer_queue().await {
            Ok(queue) => {
                queue::apply_queue_snapshot(&state, &queue);
                observe_tick(&state, "queue", "success", start);
            }
            Err(err) => {
                warn!(error = %err, "queue poll failed; keeping previous panel");
                observe_tick(&state, "queue", "error", start);
            }
        }
    }
}

fn observe_tick(state: &ConsoleState, loop_name: &str, outcome: &str, start: Instant) {
    state
        .metrics
        .poll_ticks_total
        .with_label_values(&[loop_name, outcome])
        .inc();
    state
        .metrics
        .poll_latency_seconds
        .with_label_values(&[loop_name])
        .observe(start.elapsed().as_secs_f64());
}
