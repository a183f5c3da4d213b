pub mod calculator;
pub mod dashboard;
pub mod estimator;
pub mod fallback;
pub mod stats;

// Re-export commonly used functions
pub use calculator::{calculate_for, calculate_for_all, parse_energy, validate_energy, FetchStrategy};
pub use dashboard::Dashboard;
pub use estimator::{estimate, Estimate};
pub use fallback::{fallback_estimate, fallback_factor};
pub use stats::{compute_stats, stats_from_totals};
