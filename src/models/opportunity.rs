use serde::{Deserialize, Serialize};

use crate::risk::RiskError;

/// A single security audit listed for an opportunity's contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(default)]
    pub firm: String,
    /// `YYYY-MM-DD` or RFC 3339. Parsed lazily by the smart-contract assessor.
    pub date: String,
}

impl AuditEntry {
    pub fn new(firm: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            firm: firm.into(),
            date: date.into(),
        }
    }
}

/// Everything the engine knows about one yield opportunity.
///
/// Every field is optional on the wire. Counts and day spans are plain JSON
/// numbers, so `400` and `400.0` both parse. Absent numeric fields default to zero,
/// absent flags to `false`, with these exceptions:
/// - `token1_volatility` / `token2_volatility` default to `0.5`
/// - `btc_correlation` defaults to `0.5`
/// - `oracle_provider` / `bridge_provider` default to `"unknown"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpportunityRecord {
    // Context merged in by the caller
    pub chain: Option<String>,
    pub protocol: Option<String>,
    pub apy: f64,

    // Liquidity
    pub tvl: f64,
    pub volume_24h: f64,
    pub unique_liquidity_providers: f64,
    pub lock_period_days: f64,

    // Smart contract
    pub audits: Vec<AuditEntry>,
    pub bug_bounty_size: f64,
    pub contract_age_days: f64,
    pub known_vulnerabilities: f64,
    pub upgradeable: bool,
    pub timelock_days: f64,

    // Impermanent loss
    pub is_lp_position: bool,
    pub is_stable_pair: bool,
    pub concentrated_liquidity: bool,
    pub il_protection: bool,
    pub token1_volatility: f64,
    pub token2_volatility: f64,
    pub token_correlation: f64,

    // Protocol
    pub protocol_tvl: f64,
    pub protocol_age_days: f64,
    pub team_doxxed: bool,
    pub previous_exploits: f64,

    // Market
    pub token_types: Vec<String>,
    pub btc_correlation: f64,
    pub sensitive_to_rates: bool,

    // Regulatory
    pub restricted_regions: Vec<String>,
    pub kyc_required: bool,
    pub potential_security: bool,

    // Oracle
    pub oracle_provider: String,
    pub multi_oracle: bool,
    pub twap_enabled: bool,

    // Bridge
    pub uses_bridge: bool,
    pub bridge_provider: String,
    pub bridge_tvl: f64,
    pub bridge_hacked_before: bool,
}

impl Default for OpportunityRecord {
    fn default() -> Self {
        Self {
            chain: None,
            protocol: None,
            apy: 0.0,
            tvl: 0.0,
            volume_24h: 0.0,
            unique_liquidity_providers: 0.0,
            lock_period_days: 0.0,
            audits: Vec::new(),
            bug_bounty_size: 0.0,
            contract_age_days: 0.0,
            known_vulnerabilities: 0.0,
            upgradeable: false,
            timelock_days: 0.0,
            is_lp_position: false,
            is_stable_pair: false,
            concentrated_liquidity: false,
            il_protection: false,
            token1_volatility: 0.5,
            token2_volatility: 0.5,
            token_correlation: 0.0,
            protocol_tvl: 0.0,
            protocol_age_days: 0.0,
            team_doxxed: false,
            previous_exploits: 0.0,
            token_types: Vec::new(),
            btc_correlation: 0.5,
            sensitive_to_rates: false,
            restricted_regions: Vec::new(),
            kyc_required: false,
            potential_security: false,
            oracle_provider: "unknown".to_string(),
            multi_oracle: false,
            twap_enabled: false,
            uses_bridge: false,
            bridge_provider: "unknown".to_string(),
            bridge_tvl: 0.0,
            bridge_hacked_before: false,
        }
    }
}

impl OpportunityRecord {
    /// Parse a record from a JSON object. Wrong value types (a string where
    /// `tvl` expects a number, say) are reported, missing keys are defaulted.
    pub fn from_json(json: &str) -> Result<Self, RiskError> {
        let record: OpportunityRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, RiskError> {
        let record: OpportunityRecord = serde_json::from_value(value)?;
        record.validate()?;
        Ok(record)
    }

    /// Merge request context into the record. Existing values are overwritten
    /// only when the caller actually supplies one.
    pub fn with_context(mut self, chain: Option<String>, protocol: Option<String>) -> Self {
        if chain.is_some() {
            self.chain = chain;
        }
        if protocol.is_some() {
            self.protocol = protocol;
        }
        self
    }

    /// Reject non-finite reals and negative counts. Records built in code
    /// bypass serde, so the engine calls this again before scoring.
    pub fn validate(&self) -> Result<(), RiskError> {
        let reals = [
            ("apy", self.apy),
            ("tvl", self.tvl),
            ("volume_24h", self.volume_24h),
            ("bug_bounty_size", self.bug_bounty_size),
            ("token1_volatility", self.token1_volatility),
            ("token2_volatility", self.token2_volatility),
            ("token_correlation", self.token_correlation),
            ("protocol_tvl", self.protocol_tvl),
            ("btc_correlation", self.btc_correlation),
            ("bridge_tvl", self.bridge_tvl),
        ];

        for (field, value) in reals {
            if !value.is_finite() {
                return Err(RiskError::InvalidField {
                    field: field.to_string(),
                    message: format!("expected a finite number, got {}", value),
                });
            }
        }

        let counts = [
            ("unique_liquidity_providers", self.unique_liquidity_providers),
            ("lock_period_days", self.lock_period_days),
            ("contract_age_days", self.contract_age_days),
            ("known_vulnerabilities", self.known_vulnerabilities),
            ("timelock_days", self.timelock_days),
            ("protocol_age_days", self.protocol_age_days),
            ("previous_exploits", self.previous_exploits),
        ];

        for (field, value) in counts {
            if !value.is_finite() || value < 0.0 {
                return Err(RiskError::InvalidField {
                    field: field.to_string(),
                    message: format!("expected a non-negative number, got {}", value),
                });
            }
        }

        Ok(())
    }

    pub fn has_token_type(&self, token_type: &str) -> bool {
        self.token_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(token_type))
    }

    pub fn is_restricted_in(&self, region: &str) -> bool {
        self.restricted_regions
            .iter()
            .any(|r| r.eq_ignore_ascii_case(region))
    }
}
