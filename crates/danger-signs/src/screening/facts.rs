use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known fact names produced by the encounter forms.
///
/// Rules address facts by these names. Unknown names are carried in the set
/// untouched; no predicate reads them, so they can never trigger an alert.
pub mod fields {
    pub const SYSTOLIC_BP: &str = "systolicBP";
    pub const DIASTOLIC_BP: &str = "diastolicBP";
    pub const URINE_PROTEIN: &str = "urineProtein";
    pub const HEMOGLOBIN: &str = "hemoglobin";
    pub const OXYGEN_SATURATION: &str = "oxygenSaturation";
    pub const RESPIRATORY_RATE: &str = "respiratoryRate";
    pub const FETAL_HEART_RATE: &str = "fetalHeartRate";
}

/// Value recorded for a single clinical fact.
///
/// Serializes untagged so wire payloads stay plain JSON scalars, e.g.
/// `{"systolicBP": 150, "urineProtein": "2+", "convulsions": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl FactValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FactValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FactValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FactValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for FactValue {
    fn from(value: f64) -> Self {
        FactValue::Number(value)
    }
}

impl From<i32> for FactValue {
    fn from(value: i32) -> Self {
        FactValue::Number(value.into())
    }
}

impl From<bool> for FactValue {
    fn from(value: bool) -> Self {
        FactValue::Flag(value)
    }
}

impl From<&str> for FactValue {
    fn from(value: &str) -> Self {
        FactValue::Text(value.to_string())
    }
}

impl From<String> for FactValue {
    fn from(value: String) -> Self {
        FactValue::Text(value)
    }
}

/// Snapshot of the measurements and symptoms evaluated in one screening call.
///
/// Backed by a `BTreeMap` so iteration and serialization order are stable for
/// a given set of contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactSet(BTreeMap<String, FactValue>);

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fact, replacing any earlier value under the same name.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FactValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style insert for fixtures and incremental construction.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FactValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FactValue> {
        self.0.get(field)
    }

    /// Numeric reading of a fact, or `None` when absent or not a number.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(FactValue::as_number)
    }

    /// Text reading of a fact, or `None` when absent or not text.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(FactValue::as_text)
    }

    /// Boolean reading of a fact, or `None` when absent or not a flag.
    pub fn flag(&self, field: &str) -> Option<bool> {
        self.0.get(field).and_then(FactValue::as_flag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
