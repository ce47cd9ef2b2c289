// Oracle and price feed risk
use tracing::warn;

use crate::models::{OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::tables::{oracle_provider_risk, UNLISTED_PROVIDER_RISK};
use crate::risk::{AssessmentContext, CategoryRiskAssessor, MetricBuilder, RiskError};

const CONFIDENCE: f64 = 0.8;

const MULTI_ORACLE_DISCOUNT: f64 = 0.6;
const TWAP_DISCOUNT: f64 = 0.8;

pub struct OracleRiskAssessor;

impl OracleRiskAssessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OracleRiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRiskAssessor for OracleRiskAssessor {
    fn category(&self) -> RiskCategory {
        RiskCategory::Oracle
    }

    fn confidence(&self) -> f64 {
        CONFIDENCE
    }

    fn assess(
        &self,
        record: &OpportunityRecord,
        _context: &AssessmentContext,
    ) -> Result<RiskMetric, RiskError> {
        let mut metric = MetricBuilder::new(self.category(), CONFIDENCE);
        let provider = record.oracle_provider.as_str();

        let mut score = oracle_provider_risk(provider).unwrap_or_else(|| {
            warn!(provider = %provider, "Unlisted oracle provider, assuming worst case");
            UNLISTED_PROVIDER_RISK
        });
        metric.factor("oracle_provider", provider);

        if score <= 3.0 {
            metric.mitigate(format!("Reputable oracle: {}", provider));
        } else if score >= 7.0 {
            metric.mitigate(format!("⚠️ Weak price feed: {}", provider));
        }

        metric.factor("multi_oracle", record.multi_oracle);
        if record.multi_oracle {
            score *= MULTI_ORACLE_DISCOUNT;
            metric.mitigate("Multiple oracle sources for redundancy");
        }

        metric.factor("twap_protection", record.twap_enabled);
        if record.twap_enabled {
            score *= TWAP_DISCOUNT;
            metric.mitigate("TWAP protection against manipulation");
        }

        Ok(metric.build(score))
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["oracle_provider", "multi_oracle", "twap_protection"]
    }
}
