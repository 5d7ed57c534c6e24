use prometheus::{
    Encoder, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub poll_ticks_total: IntCounterVec,
    pub poll_latency_seconds: HistogramVec,
    pub notifications_total: IntCounterVec,
    pub driver_markers: IntGauge,
    pub queued_customers: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let poll_ticks_total = IntCounterVec::new(
            Opts::new("poll_ticks_total", "Reconciliation ticks by loop and outcome"),
            &["loop", "outcome"],
        )
        .expect("valid poll_ticks_total metric");

        let poll_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "poll_latency_seconds",
                "Latency of one poll-and-reconcile tick in seconds",
            ),
            &["loop"],
        )
        .expect("valid poll_latency_seconds metric");

        let notifications_total = IntCounterVec::new(
            Opts::new("notifications_total", "Trip notifications by kind"),
            &["kind"],
        )
        .expect("valid notifications_total metric");

        let driver_markers = IntGauge::new("driver_markers", "Driver markers currently on the scene")
            .expect("valid driver_markers metric");

        let queued_customers =
            IntGauge::new("queued_customers", "Customers waiting in the queue panel")
                .expect("valid queued_customers metric");

        registry
            .register(Box::new(poll_ticks_total.clone()))
            .expect("register poll_ticks_total");
        registry
            .register(Box::new(poll_latency_seconds.clone()))
            .expect("register poll_latency_seconds");
        registry
            .register(Box::new(notifications_total.clone()))
            .expect("register notifications_total");
        registry
            .register(Box::new(driver_markers.clone()))
            .expect("register driver_markers");
        registry
            .register(Box::new(queued_customers.clone()))
            .expect("register queued_customers");

        Self {
            registry,
            poll_ticks_total,
            poll_latency_seconds,
            notifications_total,
            driver_markers,
            queued_customers,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
