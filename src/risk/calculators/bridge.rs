// Cross-chain bridge risk
use tracing::warn;

use crate::models::{OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::tables::{bridge_provider_risk, UNLISTED_PROVIDER_RISK};
use crate::risk::{AssessmentContext, CategoryRiskAssessor, MetricBuilder, RiskError};
use crate::utils::math::MAX_SCORE;

const CONFIDENCE: f64 = 0.75;

pub struct BridgeRiskAssessor;

impl BridgeRiskAssessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BridgeRiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRiskAssessor for BridgeRiskAssessor {
    fn category(&self) -> RiskCategory {
        RiskCategory::Bridge
    }

    fn confidence(&self) -> f64 {
        CONFIDENCE
    }

    fn assess(
        &self,
        record: &OpportunityRecord,
        _context: &AssessmentContext,
    ) -> Result<RiskMetric, RiskError> {
        if !record.uses_bridge {
            return Ok(RiskMetric::not_applicable(self.category(), "No bridge required"));
        }

        let mut metric = MetricBuilder::new(self.category(), CONFIDENCE);
        let provider = record.bridge_provider.as_str();

        let mut score = bridge_provider_risk(provider).unwrap_or_else(|| {
            warn!(provider = %provider, "Unlisted bridge provider, assuming worst case");
            UNLISTED_PROVIDER_RISK
        });
        metric.factor("bridge_provider", provider);

        if record.bridge_tvl > 1_000_000_000.0 {
            score *= 0.7;
            metric.factor("bridge_security", 7.0);
            metric.mitigate("High-security bridge with >$1B locked");
        } else if record.bridge_tvl < 10_000_000.0 {
            score = (score * 1.5).min(MAX_SCORE);
            metric.factor("bridge_security", 3.0);
            metric.mitigate("⚠️ Low-security bridge");
        }

        if record.bridge_hacked_before {
            score = (score + 3.0).min(MAX_SCORE);
            metric.mitigate("🚨 Bridge has been hacked before");
        }

        Ok(metric.build(score))
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["bridge_provider", "bridge_security"]
    }
}
