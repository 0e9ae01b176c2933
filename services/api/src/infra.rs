use danger_signs::screening::FactValue;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Parse a CLI fact value the way the wire format would: numbers and booleans
/// are detected first, anything else is kept as text.
pub(crate) fn parse_fact_value(raw: &str) -> Result<FactValue, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("fact value must not be empty".to_string());
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        return Ok(FactValue::Number(number));
    }
    if let Ok(flag) = trimmed.parse::<bool>() {
        return Ok(FactValue::Flag(flag));
    }
    Ok(FactValue::Text(trimmed.to_string()))
}
