//! Clinical danger-sign screening for antenatal and outpatient encounters.
//!
//! Encounter forms feed vital signs and symptom facts into the rule registry.
//! The engine classifies them into prioritized alerts, and the service facade
//! hands aggregated outcomes to referral workflows and the HTTP surface.

pub mod alerts;
pub(crate) mod evaluation;
pub mod facts;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use alerts::{
    AlertAggregator, AlertProvenance, DangerSignAlert, ScreeningOutcome, SeverityBreakdown,
};
pub use evaluation::DangerSignEngine;
pub use facts::{FactSet, FactValue};
pub use router::{danger_sign_router, BulkEvaluationRequest, FieldEvaluationRequest};
pub use rules::{
    DangerSignCategory, DangerSignRegistry, DangerSignRule, RulePredicate, Severity, Urgency,
};
pub use service::{
    CategoryCatalog, DangerSignService, RuleCounts, ScreeningError, ScreeningMetadata,
    ServiceHealth,
};
