use std::time::Duration;

use chrono::NaiveDate;
use moka::sync::Cache;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};

use crate::config::CacheSettings;
use crate::models::{AssessmentResult, OpportunityRecord};
use crate::risk::{RiskAssessmentEngine, RiskError};
use crate::utils::time::today_utc;

/// Wraps the engine for callers that assess repeatedly: memoizes results per
/// `(record, as_of)` and reports counters through the `metrics` facade.
pub struct RiskAssessmentService {
    engine: RiskAssessmentEngine,
    cache: Option<Cache<String, AssessmentResult>>,
}

impl RiskAssessmentService {
    /// Service without a result cache.
    pub fn new() -> Self {
        Self {
            engine: RiskAssessmentEngine::new(),
            cache: None,
        }
    }

    pub fn with_cache(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self {
            engine: RiskAssessmentEngine::new(),
            cache: Some(cache),
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        if settings.enabled {
            Self::with_cache(settings.max_capacity, Duration::from_secs(settings.ttl_seconds))
        } else {
            Self::new()
        }
    }

    pub fn engine(&self) -> &RiskAssessmentEngine {
        &self.engine
    }

    pub fn assess(&self, record: &OpportunityRecord) -> Result<AssessmentResult, RiskError> {
        self.assess_at(record, today_utc())
    }

    pub fn assess_at(
        &self,
        record: &OpportunityRecord,
        as_of: NaiveDate,
    ) -> Result<AssessmentResult, RiskError> {
        let key = match &self.cache {
            Some(cache) => {
                let key = Self::fingerprint(record, as_of)?;
                if let Some(hit) = cache.get(&key) {
                    debug!(fingerprint = %key, "Assessment served from cache");
                    metrics::increment_counter!("risk_assessment_cache_hits_total");
                    return Ok(hit);
                }
                Some(key)
            }
            None => None,
        };

        let result = match self.engine.assess_at(record, as_of) {
            Ok(result) => result,
            Err(e) => {
                error!(
                    chain = record.chain.as_deref().unwrap_or("-"),
                    protocol = record.protocol.as_deref().unwrap_or("-"),
                    "Assessment failed: {}",
                    e
                );
                metrics::increment_counter!("risk_assessment_failures_total");
                return Err(e);
            }
        };

        metrics::increment_counter!("risk_assessments_total", "risk_tier" => result.risk_tier.as_str());
        metrics::histogram!("risk_assessment_overall_score", result.overall_score);

        info!(
            chain = record.chain.as_deref().unwrap_or("-"),
            protocol = record.protocol.as_deref().unwrap_or("-"),
            overall_score = result.overall_score,
            risk_tier = %result.risk_tier,
            "Opportunity assessed"
        );

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, result.clone());
        }

        Ok(result)
    }

    /// SHA-256 over the record's JSON encoding and the evaluation date.
    /// Field order is fixed by the struct, so equal records hash equally.
    pub fn fingerprint(record: &OpportunityRecord, as_of: NaiveDate) -> Result<String, RiskError> {
        let encoded = serde_json::to_vec(record)?;

        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        hasher.update(b"|");
        hasher.update(as_of.format("%Y-%m-%d").to_string().as_bytes());

        Ok(hex::encode(hasher.finalize()))
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn cache_entry_count(&self) -> u64 {
        match &self.cache {
            Some(cache) => {
                cache.run_pending_tasks();
                cache.entry_count()
            }
            None => 0,
        }
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
            cache.run_pending_tasks();
        }
    }
}

impl Default for RiskAssessmentService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fingerprint_is_stable_and_date_sensitive() {
        let record = OpportunityRecord {
            tvl: 1_000_000.0,
            ..Default::default()
        };

        let a = RiskAssessmentService::fingerprint(&record, date(2024, 6, 1)).unwrap();
        let b = RiskAssessmentService::fingerprint(&record.clone(), date(2024, 6, 1)).unwrap();
        let c = RiskAssessmentService::fingerprint(&record, date(2024, 6, 2)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_record() {
        let base = OpportunityRecord::default();
        let other = OpportunityRecord {
            previous_exploits: 1.0,
            ..Default::default()
        };

        let as_of = date(2024, 6, 1);
        assert_ne!(
            RiskAssessmentService::fingerprint(&base, as_of).unwrap(),
            RiskAssessmentService::fingerprint(&other, as_of).unwrap()
        );
    }

    #[test]
    fn test_cached_result_matches_engine() {
        let service = RiskAssessmentService::with_cache(100, Duration::from_secs(60));
        let record = OpportunityRecord {
            tvl: 5_000_000.0,
            volume_24h: 500_000.0,
            ..Default::default()
        };
        let as_of = date(2024, 6, 1);

        let first = service.assess_at(&record, as_of).unwrap();
        let second = service.assess_at(&record, as_of).unwrap();
        let direct = service.engine().assess_at(&record, as_of).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, direct);
        assert_eq!(service.cache_entry_count(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let service = RiskAssessmentService::with_cache(100, Duration::from_secs(60));
        let record = OpportunityRecord {
            tvl: f64::INFINITY,
            ..Default::default()
        };

        assert!(service.assess_at(&record, date(2024, 6, 1)).is_err());
        assert_eq!(service.cache_entry_count(), 0);
    }

    #[test]
    fn test_disabled_cache_from_settings() {
        let settings = CacheSettings {
            enabled: false,
            max_capacity: 10,
            ttl_seconds: 60,
        };
        let service = RiskAssessmentService::from_settings(&settings);

        assert!(!service.cache_enabled());
        service.assess_at(&OpportunityRecord::default(), date(2024, 6, 1)).unwrap();
        assert_eq!(service.cache_entry_count(), 0);
    }

    #[test]
    fn test_clear_cache() {
        let service = RiskAssessmentService::with_cache(10, Duration::from_secs(60));
        service.assess_at(&OpportunityRecord::default(), date(2024, 6, 1)).unwrap();
        assert_eq!(service.cache_entry_count(), 1);

        service.clear_cache();
        assert_eq!(service.cache_entry_count(), 0);
    }
}
