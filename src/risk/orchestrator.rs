// Risk engine - runs every category assessor and aggregates the results
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

use crate::models::{AssessmentResult, OpportunityRecord, RiskCategory, RiskMetric};
use crate::risk::calculators::CATEGORY_ASSESSORS;
use crate::risk::classification::{calculate_max_allocation, determine_risk_tier, determine_suitability};
use crate::risk::recommendations::generate_recommendations;
use crate::risk::tables::category_weight;
use crate::risk::{AssessmentContext, CategoryRiskAssessor, RiskError};
use crate::utils::math::{clamp_score, weighted_average};

/// Overall score when no category carries any weight.
pub const NEUTRAL_OVERALL_SCORE: f64 = 5.0;

/// Runs the fixed table of category assessors over one opportunity and turns
/// their metrics into a rating. Holds no state between calls.
#[derive(Clone, Copy)]
pub struct RiskAssessmentEngine {
    assessors: &'static [&'static dyn CategoryRiskAssessor],
}

impl RiskAssessmentEngine {
    pub fn new() -> Self {
        Self {
            assessors: &CATEGORY_ASSESSORS,
        }
    }

    /// Assess with audit ages measured against today (UTC).
    pub fn assess(&self, record: &OpportunityRecord) -> Result<AssessmentResult, RiskError> {
        self.assess_with_context(record, &AssessmentContext::today())
    }

    /// Assess with audit ages measured against `as_of`.
    pub fn assess_at(
        &self,
        record: &OpportunityRecord,
        as_of: NaiveDate,
    ) -> Result<AssessmentResult, RiskError> {
        self.assess_with_context(record, &AssessmentContext::new(as_of))
    }

    pub fn assess_with_context(
        &self,
        record: &OpportunityRecord,
        context: &AssessmentContext,
    ) -> Result<AssessmentResult, RiskError> {
        info!(
            chain = record.chain.as_deref().unwrap_or("-"),
            protocol = record.protocol.as_deref().unwrap_or("-"),
            as_of = %context.as_of,
            "Starting opportunity risk assessment"
        );

        let metrics = self.assess_categories(record, context)?;

        let overall_score = Self::calculate_overall_risk(&metrics);
        let risk_tier = determine_risk_tier(overall_score);
        let max_allocation_percentage = calculate_max_allocation(overall_score);
        let suitable_for = determine_suitability(overall_score);
        let recommendations = generate_recommendations(
            &metrics,
            overall_score,
            max_allocation_percentage,
            record.apy,
        );

        info!(
            overall_score = overall_score,
            risk_tier = %risk_tier,
            max_allocation = max_allocation_percentage,
            recommendations = recommendations.len(),
            "Completed opportunity risk assessment"
        );

        Ok(AssessmentResult {
            overall_score,
            risk_tier,
            metrics: metrics.into_iter().map(|m| (m.category, m)).collect::<BTreeMap<_, _>>(),
            recommendations,
            suitable_for,
            max_allocation_percentage,
        })
    }

    /// Run every assessor in table order. The first failure aborts the whole
    /// assessment.
    pub fn assess_categories(
        &self,
        record: &OpportunityRecord,
        context: &AssessmentContext,
    ) -> Result<Vec<RiskMetric>, RiskError> {
        record.validate()?;

        let mut metrics = Vec::with_capacity(self.assessors.len());
        for assessor in self.assessors {
            let metric = assessor.assess(record, context).map_err(|e| {
                error!(
                    category = %assessor.category(),
                    error = %e,
                    "Category assessment failed"
                );
                e
            })?;

            debug!(
                category = %metric.category,
                score = metric.score,
                confidence = metric.confidence,
                applicable = metric.is_applicable(),
                "Assessed risk category"
            );

            metrics.push(metric);
        }

        Ok(metrics)
    }

    /// Confidence-weighted average of category scores.
    ///
    /// Not-applicable categories carry confidence 1.0 at score 0 and pull the
    /// average down: no exposure in a dimension counts as no risk from it.
    pub fn calculate_overall_risk(metrics: &[RiskMetric]) -> f64 {
        let pairs: Vec<(f64, f64)> = metrics
            .iter()
            .map(|m| (m.score, category_weight(m.category) * m.confidence))
            .collect();

        weighted_average(&pairs)
            .map(clamp_score)
            .unwrap_or(NEUTRAL_OVERALL_SCORE)
    }

    pub fn supported_categories(&self) -> Vec<RiskCategory> {
        self.assessors.iter().map(|a| a.category()).collect()
    }

    pub fn describe(&self) -> serde_json::Value {
        serde_json::Value::Array(self.assessors.iter().map(|a| a.describe()).collect())
    }
}

impl Default for RiskAssessmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RiskAssessmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskAssessmentEngine")
            .field("categories", &self.supported_categories())
            .finish()
    }
}
