pub mod opportunity;
pub mod risk_assessment;

pub use opportunity::*;
pub use risk_assessment::*;
