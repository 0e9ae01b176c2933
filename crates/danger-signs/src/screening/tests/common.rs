use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::screening::alerts::AlertAggregator;
use crate::screening::evaluation::DangerSignEngine;
use crate::screening::facts::{fields, FactSet};
use crate::screening::router::danger_sign_router;
use crate::screening::rules::DangerSignRegistry;
use crate::screening::service::DangerSignService;

pub(super) const PATIENT: &str = "ZMB-ANC-00042";

pub(super) fn engine() -> DangerSignEngine {
    DangerSignEngine::new(Arc::new(DangerSignRegistry::baseline()))
}

pub(super) fn aggregator() -> AlertAggregator {
    AlertAggregator::new(engine())
}

pub(super) fn service() -> DangerSignService {
    DangerSignService::new(Arc::new(DangerSignRegistry::baseline()))
}

pub(super) fn screening_router() -> axum::Router {
    danger_sign_router(Arc::new(service()))
}

/// Rule types triggered by `facts`, in registration order.
pub(super) fn triggered_types(facts: &FactSet) -> Vec<&'static str> {
    let engine = engine();
    engine
        .triggered(facts)
        .into_iter()
        .map(|rule| rule.rule_type)
        .collect()
}

/// Vitals a healthy second-trimester visit would record.
pub(super) fn normal_vitals() -> FactSet {
    FactSet::new()
        .with(fields::SYSTOLIC_BP, 118)
        .with(fields::DIASTOLIC_BP, 76)
        .with(fields::HEMOGLOBIN, 12.4)
        .with(fields::OXYGEN_SATURATION, 98)
        .with(fields::RESPIRATORY_RATE, 16)
        .with(fields::FETAL_HEART_RATE, 140)
        .with(fields::URINE_PROTEIN, "negative")
}

/// Combined obstetric emergency presentation triggering four rules at once.
pub(super) fn emergency_vitals() -> FactSet {
    FactSet::new()
        .with(fields::SYSTOLIC_BP, 150)
        .with(fields::DIASTOLIC_BP, 95)
        .with(fields::OXYGEN_SATURATION, 88)
        .with(fields::HEMOGLOBIN, 6.5)
        .with(fields::FETAL_HEART_RATE, 105)
        .with(fields::URINE_PROTEIN, "2+")
}

pub(super) fn post_json(uri: &str, payload: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(payload.to_string()))
        .expect("request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
