// Multi-dimensional risk assessment engine
// Category assessors, aggregation, tier classification and recommendations

pub mod traits;
pub mod metrics;
pub mod orchestrator;
pub mod errors;
pub mod calculators;
pub mod tables;
pub mod classification;
pub mod recommendations;

// Re-export main types
pub use traits::*;
pub use metrics::*;
pub use orchestrator::*;
pub use errors::*;
pub use calculators::*;
pub use classification::*;
pub use recommendations::*;

use crate::models::{AssessmentResult, OpportunityRecord};

/// Assess one opportunity with audit ages measured against today.
///
/// Missing fields fall back to their defaults; only malformed values (an
/// unparseable audit date, a non-finite number) produce an error.
pub fn assess(record: &OpportunityRecord) -> Result<AssessmentResult, RiskError> {
    RiskAssessmentEngine::new().assess(record)
}
