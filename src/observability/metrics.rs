use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// failure reasons
pub const REASON_CREDENTIALS: &str = "credentials";
pub const REASON_INVALID_ENVIRONMENT: &str = "invalid_environment";
pub const REASON_TOKEN_INFO: &str = "token_info";

static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Lazily initializes and returns the process-wide `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Access token metrics
    pub access_token_requests: IntCounter,
    pub access_token_failures: IntCounterVec,
    pub access_token_duration: Histogram,
    pub access_token_expiry_date: IntGauge,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("google_access_token".into()), None)
            .expect("valid registry prefix");

        let metrics = Arc::new(Self {
            access_token_requests: IntCounter::new("access_token_requests_total", "Total access token requests").expect("metric"),
            access_token_failures: IntCounterVec::new(Opts::new("access_token_failures_total", "Access token failures by reason"), &["reason"]).expect("metric"),
            access_token_duration: Histogram::with_opts(HistogramOpts::new("access_token_duration_seconds", "Access token fetch duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).expect("metric"),
            access_token_expiry_date: IntGauge::new("access_token_expiry_date_millis", "Adjusted expiry of the last issued token").expect("metric"),

            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").expect("metric"),
            up: IntGauge::new("up", "1 if service is healthy").expect("metric"),

            registry,
        });

        let reg = &metrics.registry;
        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(metrics.access_token_requests.clone()),
            Box::new(metrics.access_token_failures.clone()),
            Box::new(metrics.access_token_duration.clone()),
            Box::new(metrics.access_token_expiry_date.clone()),
            Box::new(metrics.config_validation_errors.clone()),
            Box::new(metrics.up.clone()),
        ];
        for collector in collectors {
            reg.register(collector).expect("metric registered once");
        }

        metrics
    }
}
