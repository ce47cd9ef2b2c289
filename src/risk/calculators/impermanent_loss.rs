// Impermanent loss risk for paired liquidity positions
use tracing::debug;

use crate::models::{OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::{AssessmentContext, CategoryRiskAssessor, MetricBuilder, RiskError};
use crate::utils::math::{blend, MAX_SCORE};

const CONFIDENCE: f64 = 0.8;

const IL_PROTECTION_DISCOUNT: f64 = 0.3;
const STABLE_PAIR_CAP: f64 = 2.0;
const CONCENTRATED_MULTIPLIER: f64 = 1.5;

pub struct ImpermanentLossRiskAssessor;

impl ImpermanentLossRiskAssessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImpermanentLossRiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRiskAssessor for ImpermanentLossRiskAssessor {
    fn category(&self) -> RiskCategory {
        RiskCategory::ImpermanentLoss
    }

    fn confidence(&self) -> f64 {
        CONFIDENCE
    }

    fn assess(
        &self,
        record: &OpportunityRecord,
        _context: &AssessmentContext,
    ) -> Result<RiskMetric, RiskError> {
        if !record.is_lp_position {
            return Ok(RiskMetric::not_applicable(self.category(), "Not an LP position"));
        }

        let mut metric = MetricBuilder::new(self.category(), CONFIDENCE);

        let vol1 = record.token1_volatility;
        let vol2 = record.token2_volatility;
        let correlation = record.token_correlation;

        let avg_vol = (vol1 + vol2) / 2.0;
        let vol_diff = (vol1 - vol2).abs();

        let vol_risk = (avg_vol * 20.0).min(MAX_SCORE);
        let correlation_risk = (1.0 - correlation.abs()) * 5.0;
        let divergence_risk = (vol_diff * 10.0).min(5.0);

        let mut score = blend(&[
            (vol_risk, 0.5),
            (correlation_risk, 0.3),
            (divergence_risk, 0.2),
        ]);

        debug!(
            vol_risk = vol_risk,
            correlation_risk = correlation_risk,
            divergence_risk = divergence_risk,
            base_score = score,
            "Calculated impermanent loss components"
        );

        metric
            .factor("volatility", avg_vol)
            .factor("correlation", correlation)
            .factor("divergence", vol_diff);

        if record.il_protection {
            score *= IL_PROTECTION_DISCOUNT;
            metric.mitigate("IL protection available");
        }

        if record.is_stable_pair {
            score = score.min(STABLE_PAIR_CAP);
            metric.mitigate("Stable pair - minimal IL risk");
        }

        if record.concentrated_liquidity {
            score = (score * CONCENTRATED_MULTIPLIER).min(MAX_SCORE);
            metric.mitigate("⚠️ Concentrated liquidity - higher IL risk");
        }

        if score > 7.0 {
            metric.mitigate("⚠️ Consider single-sided staking instead");
            metric.mitigate("⚠️ Use IL hedging strategies");
        } else if score > 4.0 {
            metric.mitigate("Monitor price ratios regularly");
            metric.mitigate("Consider rebalancing if divergence occurs");
        }

        Ok(metric.build(score))
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["volatility", "correlation", "divergence"]
    }
}
