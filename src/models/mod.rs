pub mod app_state;
pub mod emission_result;
pub mod emission_stats;
pub mod region;

pub use app_state::{AppState, CalculationGuard};
pub use emission_result::{EmissionResult, Provenance, ResultRow, ResultSet};
pub use emission_stats::EmissionStats;
pub use region::{find_region, Region, REGIONS};
