// Category-specific risk assessors
pub mod smart_contract;
pub mod impermanent_loss;
pub mod liquidity;
pub mod protocol;
pub mod market;
pub mod regulatory;
pub mod oracle;
pub mod bridge;

pub use smart_contract::SmartContractRiskAssessor;
pub use impermanent_loss::ImpermanentLossRiskAssessor;
pub use liquidity::LiquidityRiskAssessor;
pub use protocol::ProtocolRiskAssessor;
pub use market::MarketRiskAssessor;
pub use regulatory::RegulatoryRiskAssessor;
pub use oracle::OracleRiskAssessor;
pub use bridge::BridgeRiskAssessor;

use crate::risk::CategoryRiskAssessor;

/// One assessor per category, in `RiskCategory` declaration order.
pub static CATEGORY_ASSESSORS: [&dyn CategoryRiskAssessor; 8] = [
    &SmartContractRiskAssessor,
    &ImpermanentLossRiskAssessor,
    &LiquidityRiskAssessor,
    &ProtocolRiskAssessor,
    &MarketRiskAssessor,
    &RegulatoryRiskAssessor,
    &OracleRiskAssessor,
    &BridgeRiskAssessor,
];
