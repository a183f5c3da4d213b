use crate::models::EmissionResult;

pub const DEFAULT_FACTOR: f64 = 0.5;
pub const FALLBACK_YEAR: &str = "2024";
pub const FALLBACK_SOURCE: &str = "Regional Avg (Fallback)";

/// Average grid intensity per region, kg CO2e per kWh.
pub const FALLBACK_FACTORS: [(&str, f64); 10] = [
    ("IN", 0.82),
    ("CN", 0.70),
    ("US-MI", 0.55),
    ("DE", 0.35),
    ("FR", 0.06),
    ("JP", 0.45),
    ("GB", 0.23),
    ("CA", 0.14),
    ("AU", 0.68),
    ("BR", 0.09),
];

/// Factor for a region code; unknown regions use [`DEFAULT_FACTOR`].
pub fn fallback_factor(region_code: &str) -> f64 {
    FALLBACK_FACTORS
        .iter()
        .find(|(code, _)| *code == region_code)
        .map(|(_, factor)| *factor)
        .unwrap_or(DEFAULT_FACTOR)
}

pub fn fallback_estimate(region_code: &str, energy_kwh: f64) -> EmissionResult {
    let total = energy_kwh * fallback_factor(region_code);
    EmissionResult::from_total(region_code, total, FALLBACK_YEAR, FALLBACK_SOURCE)
}
