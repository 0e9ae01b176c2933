use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::evaluation::DangerSignEngine;
use super::facts::{FactSet, FactValue};
use super::rules::{DangerSignCategory, Severity, Urgency};

/// Where a triggered alert came from: the single field that changed, or the
/// full symptom set of a bulk evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlertProvenance {
    Field { field: String, value: FactValue },
    Symptoms { symptoms: FactSet },
}

/// One detection of a danger sign for a specific patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DangerSignAlert {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub alert_type: &'static str,
    pub severity: Severity,
    pub category: DangerSignCategory,
    pub message: &'static str,
    pub urgency: Urgency,
    pub referral_required: bool,
    pub risk_score: u32,
    pub timestamp: DateTime<Utc>,
    pub patient_id: String,
    #[serde(flatten)]
    pub provenance: AlertProvenance,
}

/// Alert counts partitioned by severity band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityBreakdown {
    pub red: u32,
    pub orange: u32,
    pub yellow: u32,
}

impl SeverityBreakdown {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Red => self.red += 1,
            Severity::Orange => self.orange += 1,
            Severity::Yellow => self.yellow += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.red + self.orange + self.yellow
    }
}

/// Aggregated result of one screening call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningOutcome {
    pub alert_count: u32,
    pub alerts: Vec<DangerSignAlert>,
    pub risk_score: u32,
    pub summary: SeverityBreakdown,
}

/// Runs the rule engine and decorates every match into a patient-scoped
/// alert with identity, timestamp, and provenance.
pub struct AlertAggregator {
    engine: DangerSignEngine,
}

impl AlertAggregator {
    pub fn new(engine: DangerSignEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &DangerSignEngine {
        &self.engine
    }

    /// Evaluate one changed field against optional context facts.
    ///
    /// The explicit field wins over a context entry of the same name, so the
    /// freshest measurement is the one screened.
    pub fn evaluate_field(
        &self,
        patient_id: &str,
        field: &str,
        value: FactValue,
        context: Option<&FactSet>,
    ) -> ScreeningOutcome {
        let mut facts = context.cloned().unwrap_or_default();
        facts.insert(field, value.clone());

        let provenance = AlertProvenance::Field {
            field: field.to_string(),
            value,
        };
        self.assemble(patient_id, &facts, &provenance)
    }

    /// Evaluate a full symptom set, e.g. when an encounter form is saved.
    pub fn evaluate_symptoms(&self, patient_id: &str, symptoms: &FactSet) -> ScreeningOutcome {
        let provenance = AlertProvenance::Symptoms {
            symptoms: symptoms.clone(),
        };
        self.assemble(patient_id, symptoms, &provenance)
    }

    fn assemble(
        &self,
        patient_id: &str,
        facts: &FactSet,
        provenance: &AlertProvenance,
    ) -> ScreeningOutcome {
        let timestamp = Utc::now();
        let mut alerts = Vec::new();
        let mut risk_score = 0;
        let mut summary = SeverityBreakdown::default();

        for rule in self.engine.triggered(facts) {
            risk_score += rule.risk_score;
            summary.record(rule.severity);
            alerts.push(DangerSignAlert {
                id: Uuid::new_v4(),
                alert_type: rule.rule_type,
                severity: rule.severity,
                category: rule.category,
                message: rule.message,
                urgency: rule.urgency,
                referral_required: rule.referral_required,
                risk_score: rule.risk_score,
                timestamp,
                patient_id: patient_id.to_string(),
                provenance: provenance.clone(),
            });
        }

        ScreeningOutcome {
            alert_count: alerts.len() as u32,
            alerts,
            risk_score,
            summary,
        }
    }
}
