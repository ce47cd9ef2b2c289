pub mod risk_assessment_service;

pub use risk_assessment_service::*;
