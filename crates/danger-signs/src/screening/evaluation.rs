use std::sync::Arc;

use super::facts::FactSet;
use super::rules::{DangerSignRegistry, DangerSignRule};

/// Stateless evaluator that runs every registered rule against a fact set.
pub struct DangerSignEngine {
    registry: Arc<DangerSignRegistry>,
}

impl DangerSignEngine {
    pub fn new(registry: Arc<DangerSignRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DangerSignRegistry {
        &self.registry
    }

    /// Rules whose predicates hold for `facts`, in registration order.
    ///
    /// Every rule is consulted on every call; earlier matches never suppress
    /// later ones. A fact set no rule recognizes yields an empty list rather
    /// than an error.
    pub fn triggered(&self, facts: &FactSet) -> Vec<&DangerSignRule> {
        self.registry
            .rules()
            .iter()
            .filter(|rule| (rule.predicate)(facts))
            .collect()
    }
}
