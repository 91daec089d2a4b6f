use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::ServiceError;

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "slaughterhouse_operations_total",
        "Entity operations handled, by boundary outcome",
        &["entity", "operation", "outcome"]
    )
    .expect("register operations_total")
});

fn outcome<T>(result: &Result<T, ServiceError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(ServiceError::Validation(_)) => "invalid",
        Err(ServiceError::Db(_)) => "error",
    }
}

/// Count one operation and hand the result back unchanged.
pub fn observe<T>(
    entity: &str,
    operation: &str,
    result: Result<T, ServiceError>,
) -> Result<T, ServiceError> {
    OPERATIONS_TOTAL.with_label_values(&[entity, operation, outcome(&result)]).inc();
    result
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_counts_by_outcome() {
        let counter = OPERATIONS_TOTAL.with_label_values(&["tray", "get", "not_found"]);
        let before = counter.get();
        let res: Result<(), _> = observe("tray", "get", Err(ServiceError::not_found("Tray", 1)));
        assert!(res.is_err());
        assert_eq!(counter.get(), before + 1);

        let (status, body) = encode_metrics();
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("slaughterhouse_operations_total"));
    }
}
