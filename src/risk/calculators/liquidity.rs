// Liquidity and exit risk
use crate::models::{OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::{AssessmentContext, CategoryRiskAssessor, MetricBuilder, RiskError};
use crate::utils::math::{blend, MAX_SCORE};

const CONFIDENCE: f64 = 0.9;

/// Locks up to this many days carry no penalty.
const FREE_LOCK_DAYS: f64 = 30.0;

pub struct LiquidityRiskAssessor;

impl LiquidityRiskAssessor {
    pub fn new() -> Self {
        Self
    }

    fn tvl_depth_risk(&self, tvl: f64, metric: &mut MetricBuilder) -> f64 {
        if tvl > 10_000_000.0 {
            metric.factor("tvl_depth", 9.0);
            metric.mitigate("Deep liquidity pool >$10M");
            1.0
        } else if tvl > 1_000_000.0 {
            metric.factor("tvl_depth", 6.0);
            3.0
        } else if tvl > 100_000.0 {
            metric.factor("tvl_depth", 3.0);
            6.0
        } else {
            metric.factor("tvl_depth", 1.0);
            metric.mitigate("⚠️ Low liquidity - difficult exits");
            9.0
        }
    }

    fn turnover_risk(&self, tvl: f64, volume_24h: f64, metric: &mut MetricBuilder) -> f64 {
        if tvl <= 0.0 {
            return MAX_SCORE;
        }

        let turnover = volume_24h / tvl;
        metric.factor("turnover", turnover);

        if turnover > 1.0 {
            metric.mitigate("High trading activity");
            2.0
        } else if turnover > 0.1 {
            4.0
        } else {
            metric.mitigate("⚠️ Low trading volume");
            7.0
        }
    }

    fn concentration_risk(&self, unique_lps: f64, metric: &mut MetricBuilder) -> f64 {
        if unique_lps > 100.0 {
            metric.factor("lp_distribution", 8.0);
            metric.mitigate("Well-distributed liquidity providers");
            2.0
        } else if unique_lps > 20.0 {
            metric.factor("lp_distribution", 5.0);
            5.0
        } else {
            metric.factor("lp_distribution", 2.0);
            metric.mitigate("⚠️ Concentrated liquidity providers");
            8.0
        }
    }

    fn lock_risk(&self, lock_days: f64, metric: &mut MetricBuilder) -> f64 {
        if lock_days > FREE_LOCK_DAYS {
            metric.factor("lock_period", lock_days);
            metric.mitigate(format!("⚠️ {} day lock period", lock_days));
            (lock_days / 10.0).min(MAX_SCORE)
        } else {
            metric.factor("lock_period", 0.0);
            0.0
        }
    }
}

impl Default for LiquidityRiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRiskAssessor for LiquidityRiskAssessor {
    fn category(&self) -> RiskCategory {
        RiskCategory::Liquidity
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

        let tvl_risk = self.tvl_depth_risk(record.tvl, &mut metric);
        let volume_risk = self.turnover_risk(record.tvl, record.volume_24h, &mut metric);
        let concentration_risk =
            self.concentration_risk(record.unique_liquidity_providers, &mut metric);
        let lock_risk = self.lock_risk(record.lock_period_days, &mut metric);

        let score = blend(&[
            (tvl_risk, 0.4),
            (volume_risk, 0.3),
            (concentration_risk, 0.2),
            (lock_risk, 0.1),
        ]);

        Ok(metric.build(score))
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["tvl_depth", "turnover", "lp_distribution", "lock_period"]
    }
}
