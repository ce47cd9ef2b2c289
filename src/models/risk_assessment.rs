use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The eight independent risk dimensions. Declaration order is the order
/// assessors run in and the key order of `AssessmentResult::metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    SmartContract,
    ImpermanentLoss,
    Liquidity,
    Protocol,
    Market,
    Regulatory,
    Oracle,
    Bridge,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 8] = [
        RiskCategory::SmartContract,
        RiskCategory::ImpermanentLoss,
        RiskCategory::Liquidity,
        RiskCategory::Protocol,
        RiskCategory::Market,
        RiskCategory::Regulatory,
        RiskCategory::Oracle,
        RiskCategory::Bridge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::SmartContract => "smart_contract",
            RiskCategory::ImpermanentLoss => "impermanent_loss",
            RiskCategory::Liquidity => "liquidity",
            RiskCategory::Protocol => "protocol",
            RiskCategory::Market => "market",
            RiskCategory::Regulatory => "regulatory",
            RiskCategory::Oracle => "oracle",
            RiskCategory::Bridge => "bridge",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of one explainability sub-signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl FactorValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FactorValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FactorValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<f64> for FactorValue {
    fn from(value: f64) -> Self {
        FactorValue::Number(value)
    }
}

impl From<bool> for FactorValue {
    fn from(value: bool) -> Self {
        FactorValue::Flag(value)
    }
}

impl From<&str> for FactorValue {
    fn from(value: &str) -> Self {
        FactorValue::Text(value.to_string())
    }
}

impl From<String> for FactorValue {
    fn from(value: String) -> Self {
        FactorValue::Text(value)
    }
}

/// Score for one category. `score` is 0-10 with 10 the highest risk.
/// `factors` are keyed and serialized in name order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetric {
    pub category: RiskCategory,
    pub score: f64,
    pub confidence: f64,
    pub factors: BTreeMap<String, FactorValue>,
    pub mitigation: Vec<String>,
}

impl RiskMetric {
    /// Metric for a dimension that does not apply to the opportunity.
    pub fn not_applicable(category: RiskCategory, reason: &str) -> Self {
        let mut factors = BTreeMap::new();
        factors.insert("not_applicable".to_string(), FactorValue::Flag(true));

        Self {
            category,
            score: 0.0,
            confidence: 1.0,
            factors,
            mitigation: vec![reason.to_string()],
        }
    }

    pub fn is_applicable(&self) -> bool {
        !matches!(self.factors.get("not_applicable"), Some(FactorValue::Flag(true)))
    }

    pub fn factor(&self, name: &str) -> Option<&FactorValue> {
        self.factors.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Minimal,
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Minimal => "MINIMAL",
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Extreme => "EXTREME",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestorProfile {
    Conservative,
    Moderate,
    Aggressive,
    Degen,
}

impl fmt::Display for InvestorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvestorProfile::Conservative => "Conservative",
            InvestorProfile::Moderate => "Moderate",
            InvestorProfile::Aggressive => "Aggressive",
            InvestorProfile::Degen => "Degen",
        };
        f.write_str(label)
    }
}

/// Full output of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub overall_score: f64,
    pub risk_tier: RiskTier,
    pub metrics: BTreeMap<RiskCategory, RiskMetric>,
    pub recommendations: Vec<String>,
    pub suitable_for: Vec<InvestorProfile>,
    pub max_allocation_percentage: u8,
}

impl AssessmentResult {
    pub fn metric(&self, category: RiskCategory) -> Option<&RiskMetric> {
        self.metrics.get(&category)
    }
}

/// The subset of an assessment an API layer hands back to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub overall_score: f64,
    pub risk_tier: RiskTier,
    pub recommendations: Vec<String>,
    pub suitable_for: Vec<InvestorProfile>,
    pub max_allocation_percentage: u8,
}

impl From<AssessmentResult> for AssessmentResponse {
    fn from(result: AssessmentResult) -> Self {
        Self {
            overall_score: result.overall_score,
            risk_tier: result.risk_tier,
            recommendations: result.recommendations,
            suitable_for: result.suitable_for,
            max_allocation_percentage: result.max_allocation_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&RiskCategory::ImpermanentLoss).unwrap();
        assert_eq!(json, "\"impermanent_loss\"");
        assert_eq!(RiskCategory::SmartContract.to_string(), "smart_contract");
    }

    #[test]
    fn test_tier_serializes_upper_case() {
        let json = serde_json::to_string(&RiskTier::Extreme).unwrap();
        assert_eq!(json, "\"EXTREME\"");
        assert!(RiskTier::Minimal < RiskTier::Extreme);
    }

    #[test]
    fn test_not_applicable_metric() {
        let metric = RiskMetric::not_applicable(RiskCategory::Bridge, "No bridge required");
        assert_eq!(metric.score, 0.0);
        assert_eq!(metric.confidence, 1.0);
        assert!(!metric.is_applicable());
        assert_eq!(metric.mitigation, vec!["No bridge required".to_string()]);
    }

    #[test]
    fn test_factors_serialize_in_name_order() {
        let mut factors = BTreeMap::new();
        factors.insert("upgrade_risk".to_string(), FactorValue::from(2.0));
        factors.insert("audit_quality".to_string(), FactorValue::from(9.0));
        factors.insert("bug_bounty".to_string(), FactorValue::from(5.0));

        let metric = RiskMetric {
            category: RiskCategory::SmartContract,
            score: 1.0,
            confidence: 0.85,
            factors,
            mitigation: Vec::new(),
        };

        let json = serde_json::to_string(&metric.factors).unwrap();
        assert_eq!(json, r#"{"audit_quality":9.0,"bug_bounty":5.0,"upgrade_risk":2.0}"#);
    }

    #[test]
    fn test_factor_values_serialize_untagged() {
        let mut factors = BTreeMap::new();
        factors.insert("multi_oracle".to_string(), FactorValue::from(true));
        factors.insert("oracle_provider".to_string(), FactorValue::from("chainlink"));
        factors.insert("turnover".to_string(), FactorValue::from(0.25));

        let json = serde_json::to_value(&factors).unwrap();
        assert_eq!(json["multi_oracle"], serde_json::json!(true));
        assert_eq!(json["oracle_provider"], serde_json::json!("chainlink"));
        assert_eq!(json["turnover"], serde_json::json!(0.25));
    }
}
