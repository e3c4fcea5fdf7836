//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_entity_request, record_http_request,
    record_store_operation, PrometheusMetrics,
};
