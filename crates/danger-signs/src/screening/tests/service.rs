use std::collections::BTreeMap;

use serde_json::json;

use super::common::*;
use crate::screening::facts::{fields, FactSet, FactValue};
use crate::screening::service::{ScreeningError, ScreeningMetadata};

#[test]
fn blank_patient_ids_are_rejected() {
    let service = service();

    match service.evaluate_symptoms("   ", &FactSet::new(), None) {
        Err(ScreeningError::MissingPatientId) => {}
        other => panic!("expected missing patient id, got {other:?}"),
    }

    match service.evaluate_field("", fields::HEMOGLOBIN, FactValue::Number(6.0), None, None) {
        Err(ScreeningError::MissingPatientId) => {}
        other => panic!("expected missing patient id, got {other:?}"),
    }
}

#[test]
fn patient_ids_are_trimmed_before_alerts_are_built() {
    let service = service();

    let outcome = service
        .evaluate_field(
            "  ZMB-77  ",
            fields::HEMOGLOBIN,
            FactValue::Number(6.0),
            None,
            None,
        )
        .expect("evaluation succeeds");

    assert_eq!(outcome.alerts[0].patient_id, "ZMB-77");
}

#[test]
fn metadata_is_accepted_without_being_interpreted() {
    let service = service();
    let mut metadata: ScreeningMetadata = BTreeMap::new();
    metadata.insert("gestationalAge".to_string(), json!(28));
    metadata.insert("facilityId".to_string(), json!("HF-0193"));

    let outcome = service
        .evaluate_symptoms(PATIENT, &normal_vitals(), Some(&metadata))
        .expect("evaluation succeeds");

    assert_eq!(outcome.alert_count, 0);
}

#[test]
fn combined_danger_signs_accumulate_risk() {
    let service = service();

    let outcome = service
        .evaluate_symptoms(PATIENT, &emergency_vitals(), None)
        .expect("evaluation succeeds");

    assert_eq!(outcome.alert_count, 4);
    assert_eq!(outcome.risk_score, 34);
    assert_eq!(outcome.summary.red, 2);
    assert_eq!(outcome.summary.orange, 2);
    assert_eq!(outcome.summary.yellow, 0);
}

#[test]
fn category_catalog_is_stable_across_calls() {
    let service = service();
    let first = service.categories().clone();
    let second = service.categories().clone();

    assert_eq!(first.categories, second.categories);
    assert_eq!(first.counts, second.counts);
    assert_eq!(
        first.categories,
        vec![
            "Cardiovascular",
            "Maternal",
            "Hematological",
            "Respiratory",
            "Fetal"
        ]
    );
    assert_eq!(first.counts.total, 7);
    assert_eq!(first.counts.red, 3);
    assert_eq!(first.counts.orange, 2);
    assert_eq!(first.counts.yellow, 2);
}

#[test]
fn health_reports_rules_and_version() {
    let service = service();
    let health = service.health();

    assert_eq!(health.status, "ok");
    assert_eq!(health.rules_loaded, 7);
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}
