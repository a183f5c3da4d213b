// Outbound emission-factor API
pub mod client;
pub mod climatiq;
pub mod error;

pub use client::{post_json, set_silent};
pub use climatiq::{parse_estimate, ClimatiqClient};
pub use error::EstimationError;
