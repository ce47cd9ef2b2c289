// Actionable recommendations derived from category metrics
use crate::models::{RiskCategory, RiskMetric};

/// Only the riskiest few categories contribute mitigations.
const TOP_RISK_CATEGORIES: usize = 3;
const MITIGATIONS_PER_CATEGORY: usize = 2;
const HIGH_CATEGORY_SCORE: f64 = 6.0;
const WAIT_OVERALL_SCORE: f64 = 7.0;
const HIGH_APY_PERCENT: f64 = 100.0;

/// Build the ordered recommendation list. Output order is fixed: category
/// mitigations, sizing, timing, hedging.
pub fn generate_recommendations(
    metrics: &[RiskMetric],
    overall_score: f64,
    max_allocation: u8,
    apy: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    // Stable sort keeps category order among equal scores
    let mut ranked: Vec<&RiskMetric> = metrics.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    for metric in ranked.iter().take(TOP_RISK_CATEGORIES) {
        if metric.score > HIGH_CATEGORY_SCORE {
            recommendations.extend(
                metric
                    .mitigation
                    .iter()
                    .take(MITIGATIONS_PER_CATEGORY)
                    .cloned(),
            );
        }
    }

    recommendations.push(format!(
        "💰 Maximum allocation: {}% of portfolio",
        max_allocation
    ));

    if overall_score > WAIT_OVERALL_SCORE {
        recommendations.push("⏰ Consider waiting for risk factors to improve".to_string());
    } else if apy > HIGH_APY_PERCENT {
        recommendations.push("⏰ Enter gradually to avoid FOMO".to_string());
    }

    let il_is_high = metrics
        .iter()
        .any(|m| m.category == RiskCategory::ImpermanentLoss && m.score > HIGH_CATEGORY_SCORE);
    if il_is_high {
        recommendations.push("🛡️ Consider IL hedging strategies or insurance".to_string());
    }

    recommendations
}
