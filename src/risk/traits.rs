// Category risk assessor trait and shared evaluation context
use chrono::{NaiveDate, Utc};

use crate::models::{OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::RiskError;

/// Inputs that are not part of the opportunity itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentContext {
    /// Date audit ages are measured against.
    pub as_of: NaiveDate,
}

impl AssessmentContext {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    pub fn today() -> Self {
        Self {
            as_of: Utc::now().date_naive(),
        }
    }
}

/// Scores one risk dimension of an opportunity.
///
/// Implementations are stateless: the same record and context always produce
/// the same metric.
pub trait CategoryRiskAssessor: Send + Sync {
    /// The dimension this assessor owns
    fn category(&self) -> RiskCategory;

    /// How far the heuristic is trusted, in `[0, 1]`. Fixed per category.
    fn confidence(&self) -> f64;

    /// Produce the metric for `record`
    fn assess(
        &self,
        record: &OpportunityRecord,
        context: &AssessmentContext,
    ) -> Result<RiskMetric, RiskError>;

    /// Names of the factors this assessor may report
    fn risk_factors(&self) -> Vec<&'static str>;

    fn version(&self) -> &'static str {
        "1.0.0"
    }

    fn describe(&self) -> serde_json::Value {
        serde_json::json!({
            "category": self.category().as_str(),
            "version": self.version(),
            "confidence": self.confidence(),
            "risk_factors": self.risk_factors(),
        })
    }
}
