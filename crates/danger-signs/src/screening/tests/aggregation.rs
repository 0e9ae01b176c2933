use super::common::*;
use crate::screening::alerts::AlertProvenance;
use crate::screening::facts::{fields, FactSet, FactValue};

#[test]
fn risk_score_is_the_sum_of_triggered_rules() {
    let outcome = aggregator().evaluate_symptoms(PATIENT, &emergency_vitals());

    assert_eq!(outcome.alert_count, 4);
    assert_eq!(outcome.risk_score, 34);

    let component_sum: u32 = outcome.alerts.iter().map(|alert| alert.risk_score).sum();
    assert_eq!(outcome.risk_score, component_sum);
}

#[test]
fn summary_counts_match_the_emitted_alerts() {
    let outcome = aggregator().evaluate_symptoms(PATIENT, &emergency_vitals());

    assert_eq!(outcome.summary.red, 2);
    assert_eq!(outcome.summary.orange, 2);
    assert_eq!(outcome.summary.yellow, 0);
    assert_eq!(outcome.summary.total(), outcome.alert_count);
}

#[test]
fn evaluation_is_deterministic_apart_from_alert_identity() {
    let aggregator = aggregator();
    let first = aggregator.evaluate_symptoms(PATIENT, &emergency_vitals());
    let second = aggregator.evaluate_symptoms(PATIENT, &emergency_vitals());

    let first_types: Vec<_> = first.alerts.iter().map(|alert| alert.alert_type).collect();
    let second_types: Vec<_> = second.alerts.iter().map(|alert| alert.alert_type).collect();
    assert_eq!(first_types, second_types);
    assert_eq!(first.risk_score, second.risk_score);
    assert_eq!(first.summary, second.summary);

    for (a, b) in first.alerts.iter().zip(second.alerts.iter()) {
        assert_ne!(a.id, b.id, "alert ids are unique per detection");
    }
}

#[test]
fn empty_and_irrelevant_facts_produce_zeroed_outcomes() {
    let aggregator = aggregator();

    let empty = aggregator.evaluate_symptoms(PATIENT, &FactSet::new());
    assert_eq!(empty.alert_count, 0);
    assert_eq!(empty.risk_score, 0);
    assert!(empty.alerts.is_empty());
    assert_eq!(empty.summary.total(), 0);

    let normal = aggregator.evaluate_symptoms(PATIENT, &normal_vitals());
    assert_eq!(normal.alert_count, 0);
}

#[test]
fn field_evaluation_attaches_single_field_provenance() {
    let outcome = aggregator().evaluate_field(PATIENT, fields::HEMOGLOBIN, FactValue::Number(6.2), None);

    assert_eq!(outcome.alert_count, 1);
    let alert = &outcome.alerts[0];
    assert_eq!(alert.alert_type, "severe-anemia");
    assert_eq!(alert.patient_id, PATIENT);
    match &alert.provenance {
        AlertProvenance::Field { field, value } => {
            assert_eq!(field, fields::HEMOGLOBIN);
            assert_eq!(value, &FactValue::Number(6.2));
        }
        other => panic!("expected field provenance, got {other:?}"),
    }
}

#[test]
fn bulk_evaluation_attaches_the_full_symptom_set() {
    let symptoms = FactSet::new().with(fields::HEMOGLOBIN, 8.0);
    let outcome = aggregator().evaluate_symptoms(PATIENT, &symptoms);

    assert_eq!(outcome.alert_count, 1);
    match &outcome.alerts[0].provenance {
        AlertProvenance::Symptoms { symptoms: recorded } => assert_eq!(recorded, &symptoms),
        other => panic!("expected symptom provenance, got {other:?}"),
    }
}

#[test]
fn explicit_field_wins_over_context_on_collision() {
    let context = FactSet::new()
        .with(fields::HEMOGLOBIN, 12.0)
        .with(fields::SYSTOLIC_BP, 150)
        .with(fields::DIASTOLIC_BP, 95);

    let outcome = aggregator().evaluate_field(
        PATIENT,
        fields::HEMOGLOBIN,
        FactValue::Number(6.0),
        Some(&context),
    );

    let types: Vec<_> = outcome.alerts.iter().map(|alert| alert.alert_type).collect();
    assert!(types.contains(&"severe-anemia"));
    assert!(types.contains(&"hypertension"));
    assert!(!types.contains(&"moderate-anemia"));
}

#[test]
fn alerts_in_one_outcome_share_a_timestamp() {
    let outcome = aggregator().evaluate_symptoms(PATIENT, &emergency_vitals());

    let first = outcome.alerts.first().expect("alerts present").timestamp;
    assert!(outcome.alerts.iter().all(|alert| alert.timestamp == first));
}
