pub mod config;
pub mod error;
pub mod models;
pub mod risk;
pub mod services;
pub mod utils;

pub use error::types::*;
pub use risk::assess;
