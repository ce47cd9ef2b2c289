// Smart contract risk: audits, bug bounty, battle-testing, upgradeability
use tracing::{debug, warn};

use crate::models::{AuditEntry, OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::tables::audit_firm_reputation;
use crate::risk::{AssessmentContext, CategoryRiskAssessor, MetricBuilder, RiskError};
use crate::utils::math::{format_usd_whole, MAX_SCORE};
use crate::utils::time::{days_between, parse_calendar_date};

const CONFIDENCE: f64 = 0.85;

/// Audits lose value linearly over a year, down to half their weight.
const AUDIT_DECAY_DAYS: f64 = 365.0;
const MIN_AUDIT_AGE_FACTOR: f64 = 0.5;

pub struct SmartContractRiskAssessor;

impl SmartContractRiskAssessor {
    pub fn new() -> Self {
        Self
    }

    /// Lowest risk achieved by any audit from a rated firm, or `MAX_SCORE`
    /// when none qualifies. Audits from unrated firms are skipped unread.
    fn best_audit_score(
        &self,
        audits: &[AuditEntry],
        context: &AssessmentContext,
    ) -> Result<f64, RiskError> {
        let mut best = MAX_SCORE;

        for (index, audit) in audits.iter().enumerate() {
            let Some(reputation) = audit_firm_reputation(&audit.firm) else {
                warn!(firm = %audit.firm, "Ignoring audit from unrated firm");
                continue;
            };

            let audit_date = parse_calendar_date(&audit.date).ok_or_else(|| RiskError::InvalidDate {
                field: format!("audits[{}].date", index),
                value: audit.date.clone(),
            })?;

            // Future-dated audits count as fresh
            let age_days = days_between(audit_date, context.as_of).max(0) as f64;
            let age_factor = (1.0 - age_days / AUDIT_DECAY_DAYS).max(MIN_AUDIT_AGE_FACTOR);
            let score = (1.0 - reputation * age_factor) * 10.0;

            debug!(
                firm = %audit.firm,
                age_days = age_days,
                age_factor = age_factor,
                score = score,
                "Scored audit"
            );

            best = best.min(score);
        }

        Ok(best)
    }
}

impl Default for SmartContractRiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRiskAssessor for SmartContractRiskAssessor {
    fn category(&self) -> RiskCategory {
        RiskCategory::SmartContract
    }

    fn confidence(&self) -> f64 {
        CONFIDENCE
    }

    fn assess(
        &self,
        record: &OpportunityRecord,
        context: &AssessmentContext,
    ) -> Result<RiskMetric, RiskError> {
        let mut metric = MetricBuilder::new(self.category(), CONFIDENCE);

        let mut score = MAX_SCORE;
        if record.audits.is_empty() {
            metric.factor("audit_quality", 0.0);
            metric.mitigate("⚠️ Get protocol audited by reputable firm");
        } else {
            score = self.best_audit_score(&record.audits, context)?;
            metric.factor("audit_quality", MAX_SCORE - score);

            if score < 3.0 {
                metric.mitigate("Multiple reputable audits completed");
            }
        }

        let bounty = record.bug_bounty_size;
        if bounty > 1_000_000.0 {
            metric.factor("bug_bounty", 8.0);
            score *= 0.8;
            metric.mitigate(format!("${} bug bounty program active", format_usd_whole(bounty)));
        } else if bounty > 100_000.0 {
            metric.factor("bug_bounty", 5.0);
            score *= 0.9;
        } else {
            metric.factor("bug_bounty", 2.0);
            metric.mitigate("⚠️ Consider larger bug bounty program");
        }

        if record.contract_age_days > 365.0 {
            metric.factor("battle_tested", 8.0);
            score *= 0.7;
            metric.mitigate("Contract battle-tested for >1 year");
        } else if record.contract_age_days > 90.0 {
            metric.factor("battle_tested", 5.0);
            score *= 0.85;
        } else {
            metric.factor("battle_tested", 2.0);
            metric.mitigate("⚠️ New contract - wait for battle-testing");
        }

        if record.known_vulnerabilities > 0.0 {
            score = (score + 3.0).min(MAX_SCORE);
            metric.mitigate("🚨 Known vulnerabilities detected");
        }

        if record.upgradeable {
            if record.timelock_days > 2.0 {
                metric.factor("upgrade_risk", 5.0);
                metric.mitigate(format!("{} day timelock on upgrades", record.timelock_days));
            } else {
                metric.factor("upgrade_risk", 8.0);
                score = (score + 2.0).min(MAX_SCORE);
                metric.mitigate("⚠️ Upgradeable with short/no timelock");
            }
        } else {
            metric.factor("upgrade_risk", 2.0);
            metric.mitigate("Non-upgradeable contract");
        }

        Ok(metric.build(score))
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["audit_quality", "bug_bounty", "battle_tested", "upgrade_risk"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context() -> AssessmentContext {
        AssessmentContext::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    fn assess(record: &OpportunityRecord) -> RiskMetric {
        SmartContractRiskAssessor::new().assess(record, &context()).unwrap()
    }

    #[test]
    fn test_unaudited_new_contract_is_max_risk() {
        let metric = assess(&OpportunityRecord::default());

        assert_eq!(metric.score, 10.0);
        assert_eq!(metric.confidence, 0.85);
        assert_eq!(metric.factor("audit_quality").and_then(|f| f.as_f64()), Some(0.0));
        assert_eq!(
            metric.mitigation,
            vec![
                "⚠️ Get protocol audited by reputable firm".to_string(),
                "⚠️ Consider larger bug bounty program".to_string(),
                "⚠️ New contract - wait for battle-testing".to_string(),
                "Non-upgradeable contract".to_string(),
            ]
        );
    }

    #[test]
    fn test_fresh_certik_audit() {
        let record = OpportunityRecord {
            audits: vec![AuditEntry::new("CertiK", "2025-01-01")],
            ..Default::default()
        };
        let metric = assess(&record);

        // (1 - 0.9) * 10 = 1.0, no discounts apply
        assert!((metric.score - 1.0).abs() < 1e-9);
        assert_eq!(metric.mitigation[0], "Multiple reputable audits completed");
    }

    #[test]
    fn test_audit_age_decay_floors_at_half() {
        let record = OpportunityRecord {
            audits: vec![AuditEntry::new("certik", "2020-01-01")],
            ..Default::default()
        };
        let metric = assess(&record);

        // age factor floors at 0.5: (1 - 0.45) * 10 = 5.5
        assert!((metric.score - 5.5).abs() < 1e-9);
        assert!(!metric.mitigation.contains(&"Multiple reputable audits completed".to_string()));
    }

    #[test]
    fn test_best_audit_wins() {
        let record = OpportunityRecord {
            audits: vec![
                AuditEntry::new("hacken", "2025-01-01"),
                AuditEntry::new("trail of bits", "2025-01-01"),
            ],
            ..Default::default()
        };
        let metric = assess(&record);
        assert!((metric.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrated_firm_leaves_max_risk() {
        let record = OpportunityRecord {
            audits: vec![AuditEntry::new("Bob's Audits", "2025-01-01")],
            ..Default::default()
        };
        let metric = assess(&record);
        assert_eq!(metric.score, 10.0);
        assert_eq!(metric.factor("audit_quality").and_then(|f| f.as_f64()), Some(0.0));
    }

    #[test]
    fn test_bounty_and_age_discounts_compose() {
        let record = OpportunityRecord {
            bug_bounty_size: 2_000_000.0,
            contract_age_days: 400.0,
            ..Default::default()
        };
        let metric = assess(&record);

        assert!((metric.score - 10.0 * 0.8 * 0.7).abs() < 1e-9);
        assert!(metric
            .mitigation
            .contains(&"$2,000,000 bug bounty program active".to_string()));
        assert!(metric
            .mitigation
            .contains(&"Contract battle-tested for >1 year".to_string()));
    }

    #[test]
    fn test_mid_tiers() {
        let record = OpportunityRecord {
            bug_bounty_size: 500_000.0,
            contract_age_days: 180.0,
            ..Default::default()
        };
        let metric = assess(&record);
        assert!((metric.score - 10.0 * 0.9 * 0.85).abs() < 1e-9);
        assert_eq!(metric.factor("bug_bounty").and_then(|f| f.as_f64()), Some(5.0));
        assert_eq!(metric.factor("battle_tested").and_then(|f| f.as_f64()), Some(5.0));
    }

    #[test]
    fn test_vulnerabilities_and_upgradeability_penalties_are_capped() {
        let record = OpportunityRecord {
            audits: vec![AuditEntry::new("certik", "2025-01-01")],
            known_vulnerabilities: 2.0,
            upgradeable: true,
            timelock_days: 1.0,
            ..Default::default()
        };
        let metric = assess(&record);

        // 1.0 + 3 + 2
        assert!((metric.score - 6.0).abs() < 1e-9);
        assert!(metric
            .mitigation
            .contains(&"⚠️ Upgradeable with short/no timelock".to_string()));

        let record = OpportunityRecord {
            known_vulnerabilities: 1.0,
            upgradeable: true,
            ..Default::default()
        };
        assert_eq!(assess(&record).score, 10.0);
    }

    #[test]
    fn test_long_timelock_is_reported() {
        let record = OpportunityRecord {
            upgradeable: true,
            timelock_days: 7.0,
            ..Default::default()
        };
        let metric = assess(&record);
        assert_eq!(metric.factor("upgrade_risk").and_then(|f| f.as_f64()), Some(5.0));
        assert!(metric.mitigation.contains(&"7 day timelock on upgrades".to_string()));
    }

    #[test]
    fn test_malformed_audit_date_fails() {
        let record = OpportunityRecord {
            audits: vec![
                AuditEntry::new("unknown firm", "2024-06-01"),
                AuditEntry::new("PeckShield", "sometime in 2023"),
            ],
            ..Default::default()
        };
        let result = SmartContractRiskAssessor::new().assess(&record, &context());

        match result {
            Err(RiskError::InvalidDate { field, value }) => {
                assert_eq!(field, "audits[1].date");
                assert_eq!(value, "sometime in 2023");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_unrated_firm_date_is_not_parsed() {
        let record = OpportunityRecord {
            audits: vec![
                AuditEntry::new("certik", "2025-01-01"),
                AuditEntry::new("unknown firm", "sometime in 2023"),
            ],
            ..Default::default()
        };
        let metric = assess(&record);

        // Only the fresh certik audit counts: (1 - 0.9) * 10
        assert!((metric.score - 1.0).abs() < 1e-9);
    }
}
