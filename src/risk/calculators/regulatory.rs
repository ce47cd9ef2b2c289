// Regulatory and compliance risk
use crate::models::{OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::{AssessmentContext, CategoryRiskAssessor, MetricBuilder, RiskError};
use crate::utils::math::blend;

const CONFIDENCE: f64 = 0.7;

pub struct RegulatoryRiskAssessor;

impl RegulatoryRiskAssessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RegulatoryRiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRiskAssessor for RegulatoryRiskAssessor {
    fn category(&self) -> RiskCategory {
        RiskCategory::Regulatory
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

        let us_restricted = record.is_restricted_in("US");
        metric.factor("us_restricted", us_restricted);
        let geo_risk = if us_restricted {
            metric.mitigate("⚠️ US restrictions apply");
            7.0
        } else {
            3.0
        };

        // Required KYC means a compliant operator, so lower risk
        metric.factor("kyc", record.kyc_required);
        let kyc_risk = if record.kyc_required {
            metric.mitigate("KYC compliance required");
            2.0
        } else {
            5.0
        };

        metric.factor("security_risk", record.potential_security);
        let security_risk = if record.potential_security {
            metric.mitigate("🚨 Potential security classification risk");
            8.0
        } else {
            3.0
        };

        let score = blend(&[(geo_risk, 0.4), (kyc_risk, 0.2), (security_risk, 0.4)]);

        Ok(metric.build(score))
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["us_restricted", "kyc", "security_risk"]
    }
}
