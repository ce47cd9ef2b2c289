// Incremental construction of category risk metrics
use std::collections::BTreeMap;

use crate::models::{FactorValue, RiskCategory, RiskMetric};
use crate::utils::math::clamp_score;

/// Collects factors and mitigations while an assessor works, then seals them
/// into a `RiskMetric` with the score clamped to `[0, 10]`.
#[derive(Debug)]
pub struct MetricBuilder {
    category: RiskCategory,
    confidence: f64,
    factors: BTreeMap<String, FactorValue>,
    mitigation: Vec<String>,
}

impl MetricBuilder {
    pub fn new(category: RiskCategory, confidence: f64) -> Self {
        Self {
            category,
            confidence: confidence.clamp(0.0, 1.0),
            factors: BTreeMap::new(),
            mitigation: Vec::new(),
        }
    }

    pub fn factor(&mut self, name: &str, value: impl Into<FactorValue>) -> &mut Self {
        self.factors.insert(name.to_string(), value.into());
        self
    }

    pub fn mitigate(&mut self, text: impl Into<String>) -> &mut Self {
        self.mitigation.push(text.into());
        self
    }

    pub fn build(self, score: f64) -> RiskMetric {
        RiskMetric {
            category: self.category,
            score: clamp_score(score),
            confidence: self.confidence,
            factors: self.factors,
            mitigation: self.mitigation,
        }
    }
}
