// Protocol-level risk: size, maturity, team, exploit history
use crate::models::{OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::{AssessmentContext, CategoryRiskAssessor, MetricBuilder, RiskError};
use crate::utils::math::{blend, MAX_SCORE};

const CONFIDENCE: f64 = 0.85;

pub struct ProtocolRiskAssessor;

impl ProtocolRiskAssessor {
    pub fn new() -> Self {
        Self
    }

    /// `min(10, 5 + 2n)` for `n > 0` prior exploits, otherwise zero.
    pub fn exploit_risk(previous_exploits: f64) -> f64 {
        if previous_exploits > 0.0 {
            (5.0 + previous_exploits * 2.0).min(MAX_SCORE)
        } else {
            0.0
        }
    }
}

impl Default for ProtocolRiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRiskAssessor for ProtocolRiskAssessor {
    fn category(&self) -> RiskCategory {
        RiskCategory::Protocol
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

        let tvl_risk = if record.protocol_tvl > 1_000_000_000.0 {
            metric.factor("protocol_size", 9.0);
            metric.mitigate("Blue-chip protocol with >$1B TVL");
            1.0
        } else if record.protocol_tvl > 100_000_000.0 {
            metric.factor("protocol_size", 7.0);
            3.0
        } else if record.protocol_tvl > 10_000_000.0 {
            metric.factor("protocol_size", 5.0);
            5.0
        } else {
            metric.factor("protocol_size", 2.0);
            metric.mitigate("⚠️ Small protocol - higher risk");
            8.0
        };

        let age_risk = if record.protocol_age_days > 365.0 {
            metric.factor("maturity", 8.0);
            metric.mitigate("Established protocol >1 year");
            2.0
        } else if record.protocol_age_days > 90.0 {
            metric.factor("maturity", 5.0);
            5.0
        } else {
            metric.factor("maturity", 2.0);
            metric.mitigate("⚠️ New protocol <3 months");
            8.0
        };

        let team_risk = if record.team_doxxed {
            metric.factor("team_trust", 7.0);
            metric.mitigate("Team is doxxed/known");
            3.0
        } else {
            metric.factor("team_trust", 3.0);
            metric.mitigate("⚠️ Anonymous team");
            7.0
        };

        let exploit_risk = Self::exploit_risk(record.previous_exploits);
        metric.factor("exploit_history", record.previous_exploits);
        if record.previous_exploits > 0.0 {
            metric.mitigate(format!("🚨 {} previous exploits", record.previous_exploits));
        }

        let score = blend(&[
            (tvl_risk, 0.3),
            (age_risk, 0.3),
            (team_risk, 0.2),
            (exploit_risk, 0.2),
        ]);

        Ok(metric.build(score))
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["protocol_size", "maturity", "team_trust", "exploit_history"]
    }
}
