use serde::{Deserialize, Serialize};

use super::facts::{fields, FactSet};

/// Clinical alert band, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Red,
    Orange,
    Yellow,
}

/// How quickly staff must act on a triggered rule.
///
/// Tracked separately from severity so rule authors can diverge when clinical
/// guidance calls for it; nothing cross-validates the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Critical,
    High,
    Medium,
}

/// Body system a danger sign reports against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DangerSignCategory {
    Cardiovascular,
    Maternal,
    Hematological,
    Respiratory,
    Fetal,
}

impl DangerSignCategory {
    pub const fn label(self) -> &'static str {
        match self {
            DangerSignCategory::Cardiovascular => "Cardiovascular",
            DangerSignCategory::Maternal => "Maternal",
            DangerSignCategory::Hematological => "Hematological",
            DangerSignCategory::Respiratory => "Respiratory",
            DangerSignCategory::Fetal => "Fetal",
        }
    }
}

/// Pure predicate deciding whether a rule fires for a fact set.
///
/// Predicates read facts through the typed accessors, so a missing or
/// mistyped fact simply fails to match; they never error.
pub type RulePredicate = fn(&FactSet) -> bool;

/// One detectable clinical condition: a predicate over the fact set plus the
/// metadata attached to every alert it raises.
#[derive(Debug, Clone)]
pub struct DangerSignRule {
    pub rule_type: &'static str,
    pub severity: Severity,
    pub category: DangerSignCategory,
    pub message: &'static str,
    pub urgency: Urgency,
    pub referral_required: bool,
    pub risk_score: u32,
    pub predicate: RulePredicate,
}

/// Immutable rule collection evaluated on every screening call.
///
/// Registration order is fixed at construction so triggered rules, and the
/// alerts built from them, always come back in the same order.
#[derive(Debug, Clone)]
pub struct DangerSignRegistry {
    rules: Vec<DangerSignRule>,
}

impl DangerSignRegistry {
    /// Register a custom rule set, e.g. a facility pilot protocol.
    pub fn with_rules(rules: Vec<DangerSignRule>) -> Self {
        Self { rules }
    }

    /// The ministry baseline rule set for antenatal and outpatient screening.
    pub fn baseline() -> Self {
        Self::with_rules(vec![
            DangerSignRule {
                rule_type: "severe-hypertension",
                severity: Severity::Red,
                category: DangerSignCategory::Cardiovascular,
                message: "Severe hypertension detected. Refer for emergency care immediately.",
                urgency: Urgency::Critical,
                referral_required: true,
                risk_score: 10,
                predicate: severe_hypertension,
            },
            DangerSignRule {
                rule_type: "preeclampsia",
                severity: Severity::Orange,
                category: DangerSignCategory::Maternal,
                message: "Elevated blood pressure with proteinuria suggests pre-eclampsia. Urgent referral required.",
                urgency: Urgency::High,
                referral_required: true,
                risk_score: 8,
                predicate: preeclampsia,
            },
            DangerSignRule {
                rule_type: "severe-anemia",
                severity: Severity::Red,
                category: DangerSignCategory::Hematological,
                message: "Severe anemia detected. Refer for transfusion assessment immediately.",
                urgency: Urgency::Critical,
                referral_required: true,
                risk_score: 9,
                predicate: severe_anemia,
            },
            DangerSignRule {
                rule_type: "respiratory-distress",
                severity: Severity::Red,
                category: DangerSignCategory::Respiratory,
                message: "Signs of respiratory distress. Immediate clinical attention required.",
                urgency: Urgency::Critical,
                referral_required: true,
                risk_score: 10,
                predicate: respiratory_distress,
            },
            DangerSignRule {
                rule_type: "fetal-distress",
                severity: Severity::Orange,
                category: DangerSignCategory::Fetal,
                message: "Abnormal fetal heart rate indicates possible fetal distress. Urgent assessment required.",
                urgency: Urgency::High,
                referral_required: true,
                risk_score: 7,
                predicate: fetal_distress,
            },
            DangerSignRule {
                rule_type: "moderate-anemia",
                severity: Severity::Yellow,
                category: DangerSignCategory::Hematological,
                message: "Moderate anemia detected. Start iron supplementation and recheck at the next visit.",
                urgency: Urgency::Medium,
                referral_required: false,
                risk_score: 3,
                predicate: moderate_anemia,
            },
            DangerSignRule {
                rule_type: "hypertension",
                severity: Severity::Yellow,
                category: DangerSignCategory::Cardiovascular,
                message: "Elevated blood pressure. Monitor closely and recheck within 48 hours.",
                urgency: Urgency::Medium,
                referral_required: false,
                risk_score: 4,
                predicate: hypertension,
            },
        ])
    }

    pub fn rules(&self) -> &[DangerSignRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Categories covered by the registered rules, in registration order.
    pub fn categories(&self) -> Vec<DangerSignCategory> {
        let mut seen = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&rule.category) {
                seen.push(rule.category);
            }
        }
        seen
    }
}

fn proteinuria_positive(facts: &FactSet) -> bool {
    facts
        .text(fields::URINE_PROTEIN)
        .is_some_and(|grade| matches!(grade, "2+" | "3+" | "4+"))
}

fn severe_hypertension(facts: &FactSet) -> bool {
    facts
        .number(fields::SYSTOLIC_BP)
        .is_some_and(|systolic| systolic >= 160.0)
        || facts
            .number(fields::DIASTOLIC_BP)
            .is_some_and(|diastolic| diastolic >= 110.0)
}

fn preeclampsia(facts: &FactSet) -> bool {
    facts
        .number(fields::SYSTOLIC_BP)
        .is_some_and(|systolic| systolic >= 140.0)
        && proteinuria_positive(facts)
}

fn severe_anemia(facts: &FactSet) -> bool {
    facts
        .number(fields::HEMOGLOBIN)
        .is_some_and(|hemoglobin| hemoglobin < 7.0)
}

fn respiratory_distress(facts: &FactSet) -> bool {
    facts
        .number(fields::OXYGEN_SATURATION)
        .is_some_and(|saturation| saturation < 90.0)
        || facts
            .number(fields::RESPIRATORY_RATE)
            .is_some_and(|rate| rate > 30.0)
}

fn fetal_distress(facts: &FactSet) -> bool {
    facts
        .number(fields::FETAL_HEART_RATE)
        .is_some_and(|rate| !(110.0..=160.0).contains(&rate))
}

fn moderate_anemia(facts: &FactSet) -> bool {
    facts
        .number(fields::HEMOGLOBIN)
        .is_some_and(|hemoglobin| (7.0..10.0).contains(&hemoglobin))
}

// Elevated blood pressure with positive proteinuria is reported as
// pre-eclampsia, never as plain hypertension.
fn hypertension(facts: &FactSet) -> bool {
    facts
        .number(fields::SYSTOLIC_BP)
        .is_some_and(|systolic| (140.0..160.0).contains(&systolic))
        && facts
            .number(fields::DIASTOLIC_BP)
            .is_some_and(|diastolic| (90.0..110.0).contains(&diastolic))
        && !proteinuria_positive(facts)
}
