// Market and systemic risk
use crate::models::{OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::{AssessmentContext, CategoryRiskAssessor, MetricBuilder, RiskError};
use crate::utils::math::blend;

const CONFIDENCE: f64 = 0.75;

pub struct MarketRiskAssessor;

impl MarketRiskAssessor {
    pub fn new() -> Self {
        Self
    }

    /// The safest listed token type decides; anything unrecognised is treated
    /// like a memecoin.
    fn token_type_risk(&self, record: &OpportunityRecord, metric: &mut MetricBuilder) -> f64 {
        if record.has_token_type("stablecoin") {
            metric.factor("token_stability", 8.0);
            metric.mitigate("Stablecoin exposure reduces volatility");
            2.0
        } else if record.has_token_type("bluechip") {
            metric.factor("token_stability", 6.0);
            4.0
        } else if record.has_token_type("altcoin") {
            metric.factor("token_stability", 3.0);
            7.0
        } else {
            metric.factor("token_stability", 1.0);
            metric.mitigate("⚠️ High volatility token exposure");
            9.0
        }
    }
}

impl Default for MarketRiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRiskAssessor for MarketRiskAssessor {
    fn category(&self) -> RiskCategory {
        RiskCategory::Market
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

        let type_risk = self.token_type_risk(record, &mut metric);

        let btc_correlation = record.btc_correlation.abs();
        metric.factor("market_correlation", btc_correlation);
        let correlation_risk = if btc_correlation > 0.8 {
            metric.mitigate("⚠️ High correlation with BTC");
            7.0
        } else if btc_correlation > 0.5 {
            5.0
        } else {
            metric.mitigate("Low market correlation");
            3.0
        };

        metric.factor("macro_sensitive", record.sensitive_to_rates);
        let macro_risk = if record.sensitive_to_rates {
            metric.mitigate("⚠️ Sensitive to interest rate changes");
            6.0
        } else {
            3.0
        };

        let score = blend(&[(type_risk, 0.5), (correlation_risk, 0.3), (macro_risk, 0.2)]);

        Ok(metric.build(score))
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["token_stability", "market_correlation", "macro_sensitive"]
    }
}
