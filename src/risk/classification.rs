//! Maps an overall score onto a risk tier, investor profiles and a maximum
//! portfolio allocation.
//!
//! Every rung is `score < threshold`, so a score sitting exactly on a
//! threshold lands in the next (riskier) rung: 4.0 is MEDIUM, not LOW.

use crate::models::{InvestorProfile, RiskTier};

const TIER_LADDER: [(f64, RiskTier); 4] = [
    (2.0, RiskTier::Minimal),
    (4.0, RiskTier::Low),
    (6.0, RiskTier::Medium),
    (8.0, RiskTier::High),
];

const ALLOCATION_LADDER: [(f64, u8); 4] = [(2.0, 40), (4.0, 25), (6.0, 15), (8.0, 8)];
const EXTREME_ALLOCATION: u8 = 3;

pub fn determine_risk_tier(overall_score: f64) -> RiskTier {
    TIER_LADDER
        .iter()
        .find(|(threshold, _)| overall_score < *threshold)
        .map(|(_, tier)| *tier)
        .unwrap_or(RiskTier::Extreme)
}

/// Profiles that can hold the opportunity, most conservative first.
pub fn determine_suitability(overall_score: f64) -> Vec<InvestorProfile> {
    use InvestorProfile::*;

    if overall_score < 4.0 {
        vec![Conservative, Moderate, Aggressive, Degen]
    } else if overall_score < 6.0 {
        vec![Moderate, Aggressive, Degen]
    } else if overall_score < 8.0 {
        vec![Aggressive, Degen]
    } else {
        vec![Degen]
    }
}

/// Maximum recommended share of a portfolio, in percent.
pub fn calculate_max_allocation(overall_score: f64) -> u8 {
    ALLOCATION_LADDER
        .iter()
        .find(|(threshold, _)| overall_score < *threshold)
        .map(|(_, allocation)| *allocation)
        .unwrap_or(EXTREME_ALLOCATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ladder() {
        assert_eq!(determine_risk_tier(0.0), RiskTier::Minimal);
        assert_eq!(determine_risk_tier(1.99), RiskTier::Minimal);
        assert_eq!(determine_risk_tier(2.0), RiskTier::Low);
        assert_eq!(determine_risk_tier(3.99), RiskTier::Low);
        assert_eq!(determine_risk_tier(4.0), RiskTier::Medium);
        assert_eq!(determine_risk_tier(6.0), RiskTier::High);
        assert_eq!(determine_risk_tier(7.99), RiskTier::High);
        assert_eq!(determine_risk_tier(8.0), RiskTier::Extreme);
        assert_eq!(determine_risk_tier(10.0), RiskTier::Extreme);
    }

    #[test]
    fn test_suitability_sets_are_nested() {
        use InvestorProfile::*;

        assert_eq!(
            determine_suitability(1.0),
            vec![Conservative, Moderate, Aggressive, Degen]
        );
        assert_eq!(determine_suitability(4.0), vec![Moderate, Aggressive, Degen]);
        assert_eq!(determine_suitability(6.0), vec![Aggressive, Degen]);
        assert_eq!(determine_suitability(8.0), vec![Degen]);

        let mut previous = determine_suitability(0.0);
        for step in 1..=100 {
            let current = determine_suitability(step as f64 / 10.0);
            assert!(current.iter().all(|p| previous.contains(p)));
            previous = current;
        }
    }

    #[test]
    fn test_allocation_ladder() {
        assert_eq!(calculate_max_allocation(0.5), 40);
        assert_eq!(calculate_max_allocation(2.0), 25);
        assert_eq!(calculate_max_allocation(4.0), 15);
        assert_eq!(calculate_max_allocation(6.0), 8);
        assert_eq!(calculate_max_allocation(8.0), 3);
        assert_eq!(calculate_max_allocation(10.0), 3);
    }
}
