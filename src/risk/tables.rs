//! Fixed scoring tables shared by the assessors and the aggregator.
//!
//! Provider and firm keys are lower case with `_` for spaces; lookups
//! normalize their input the same way.

use crate::models::RiskCategory;

/// Audit firm reputation, 0-1.
pub const AUDIT_FIRM_REPUTATION: [(&str, f64); 7] = [
    ("certik", 0.9),
    ("peckshield", 0.85),
    ("trail_of_bits", 0.9),
    ("consensys", 0.85),
    ("openzeppelin", 0.88),
    ("quantstamp", 0.82),
    ("hacken", 0.75),
];

/// Base oracle risk, 0-10.
pub const ORACLE_PROVIDER_RISK: [(&str, f64); 9] = [
    ("chainlink", 2.0),
    ("band", 4.0),
    ("dia", 5.0),
    ("api3", 5.0),
    ("pyth", 3.0),
    ("uma", 4.0),
    ("twap", 6.0),
    ("spot", 8.0),
    ("unknown", 9.0),
];

/// Base bridge risk, 0-10.
pub const BRIDGE_PROVIDER_RISK: [(&str, f64); 7] = [
    ("native", 2.0),
    ("layerzero", 3.0),
    ("wormhole", 4.0),
    ("axelar", 4.0),
    ("celer", 5.0),
    ("multichain", 7.0),
    ("unknown", 9.0),
];

/// Risk for any provider not listed in a table.
pub const UNLISTED_PROVIDER_RISK: f64 = 9.0;

/// Contribution of each category to the overall score. Sums to 1.0.
pub const fn category_weight(category: RiskCategory) -> f64 {
    match category {
        RiskCategory::SmartContract => 0.25,
        RiskCategory::ImpermanentLoss => 0.20,
        RiskCategory::Liquidity => 0.15,
        RiskCategory::Protocol => 0.15,
        RiskCategory::Market => 0.10,
        RiskCategory::Regulatory => 0.05,
        RiskCategory::Oracle => 0.05,
        RiskCategory::Bridge => 0.05,
    }
}

pub fn audit_firm_reputation(firm: &str) -> Option<f64> {
    lookup(&AUDIT_FIRM_REPUTATION, firm)
}

pub fn oracle_provider_risk(provider: &str) -> Option<f64> {
    lookup(&ORACLE_PROVIDER_RISK, provider)
}

pub fn bridge_provider_risk(provider: &str) -> Option<f64> {
    lookup(&BRIDGE_PROVIDER_RISK, provider)
}

fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    let key = normalize_key(key);
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_weights_sum_to_one() {
        let total: f64 = RiskCategory::ALL.iter().map(|c| category_weight(*c)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_weights() {
        assert_eq!(category_weight(RiskCategory::SmartContract), 0.25);
        assert_eq!(category_weight(RiskCategory::Bridge), 0.05);
    }

    #[test]
    fn test_lookups_ignore_case() {
        assert_eq!(audit_firm_reputation("OpenZeppelin"), Some(0.88));
        assert_eq!(audit_firm_reputation("Trail of Bits"), Some(0.9));
        assert_eq!(oracle_provider_risk("Chainlink"), Some(2.0));
        assert_eq!(bridge_provider_risk("LayerZero"), Some(3.0));
        assert_eq!(audit_firm_reputation("some_new_firm"), None);
        assert_eq!(oracle_provider_risk("homemade"), None);
    }
}
