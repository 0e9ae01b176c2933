use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::alerts::{AlertAggregator, ScreeningOutcome};
use super::evaluation::DangerSignEngine;
use super::facts::{FactSet, FactValue};
use super::rules::{DangerSignCategory, DangerSignRegistry, Severity};

/// Caller-supplied evaluation context such as gestational age, provider id,
/// or facility id. Recorded in logs for audit only; never interpreted.
pub type ScreeningMetadata = BTreeMap<String, serde_json::Value>;

#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error("patientId must not be blank")]
    MissingPatientId,
}

/// Facade composing the rule registry, engine, and aggregator behind the
/// operations the HTTP layer and the CLI call.
pub struct DangerSignService {
    aggregator: AlertAggregator,
    catalog: CategoryCatalog,
    rules_loaded: usize,
    started_at: Instant,
}

impl DangerSignService {
    pub fn new(registry: Arc<DangerSignRegistry>) -> Self {
        let catalog = CategoryCatalog::from_registry(&registry);
        let rules_loaded = registry.len();
        let aggregator = AlertAggregator::new(DangerSignEngine::new(registry));
        Self {
            aggregator,
            catalog,
            rules_loaded,
            started_at: Instant::now(),
        }
    }

    /// Screen a single changed field against optional context facts.
    pub fn evaluate_field(
        &self,
        patient_id: &str,
        field: &str,
        value: FactValue,
        context: Option<&FactSet>,
        metadata: Option<&ScreeningMetadata>,
    ) -> Result<ScreeningOutcome, ScreeningError> {
        let patient_id = normalized_patient_id(patient_id)?;
        log_metadata(metadata);

        let outcome = self.aggregator.evaluate_field(patient_id, field, value, context);
        info!(
            patient_id,
            field,
            alert_count = outcome.alert_count,
            risk_score = outcome.risk_score,
            "screened field"
        );
        Ok(outcome)
    }

    /// Screen a full symptom set.
    pub fn evaluate_symptoms(
        &self,
        patient_id: &str,
        symptoms: &FactSet,
        metadata: Option<&ScreeningMetadata>,
    ) -> Result<ScreeningOutcome, ScreeningError> {
        let patient_id = normalized_patient_id(patient_id)?;
        log_metadata(metadata);

        let outcome = self.aggregator.evaluate_symptoms(patient_id, symptoms);
        info!(
            patient_id,
            facts = symptoms.len(),
            alert_count = outcome.alert_count,
            risk_score = outcome.risk_score,
            "screened symptom set"
        );
        Ok(outcome)
    }

    /// Category coverage of the registered rules, computed once at startup.
    pub fn categories(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Liveness snapshot for dashboards and smoke checks.
    pub fn health(&self) -> ServiceHealth {
        ServiceHealth {
            status: "ok",
            rules_loaded: self.rules_loaded,
            uptime: self.started_at.elapsed().as_secs(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Static listing of rule coverage.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCatalog {
    pub categories: Vec<&'static str>,
    pub counts: RuleCounts,
}

impl CategoryCatalog {
    fn from_registry(registry: &DangerSignRegistry) -> Self {
        let categories = registry
            .categories()
            .into_iter()
            .map(DangerSignCategory::label)
            .collect();

        let mut counts = RuleCounts {
            total: registry.len() as u32,
            red: 0,
            orange: 0,
            yellow: 0,
        };
        for rule in registry.rules() {
            match rule.severity {
                Severity::Red => counts.red += 1,
                Severity::Orange => counts.orange += 1,
                Severity::Yellow => counts.yellow += 1,
            }
        }

        Self { categories, counts }
    }
}

/// Registered rules per severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleCounts {
    pub total: u32,
    pub red: u32,
    pub orange: u32,
    pub yellow: u32,
}

/// Informational health snapshot; no dependency probing behind it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: &'static str,
    pub rules_loaded: usize,
    pub uptime: u64,
    pub version: &'static str,
}

fn normalized_patient_id(patient_id: &str) -> Result<&str, ScreeningError> {
    let trimmed = patient_id.trim();
    if trimmed.is_empty() {
        return Err(ScreeningError::MissingPatientId);
    }
    Ok(trimmed)
}

fn log_metadata(metadata: Option<&ScreeningMetadata>) {
    if let Some(metadata) = metadata {
        if !metadata.is_empty() {
            debug!(keys = ?metadata.keys().collect::<Vec<_>>(), "screening metadata attached");
        }
    }
}
