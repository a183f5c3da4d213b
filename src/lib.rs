//! Grid-electricity carbon emission estimates for a fixed set of regions.
//!
//! The crate queries the Climatiq estimate API once per region, falls back to
//! static regional averages when the API cannot answer, aggregates the results
//! and renders them as a terminal report or a small web dashboard.

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod presentation;
pub mod routes;
pub mod services;
pub mod templates;
pub mod utils;

pub use error::CalculationError;
