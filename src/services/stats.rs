use crate::error::CalculationError;
use crate::models::{EmissionStats, ResultSet};
use crate::utils::round_to;

/// Max, min, mean and sum of the totals, each rounded to 3 decimals.
pub fn compute_stats(results: &ResultSet) -> Result<EmissionStats, CalculationError> {
    stats_from_totals(&results.totals())
}

pub fn stats_from_totals(totals: &[f64]) -> Result<EmissionStats, CalculationError> {
    if totals.is_empty() {
        return Err(CalculationError::EmptyAggregation);
    }
    let max = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = totals.iter().copied().fold(f64::INFINITY, f64::min);
    let sum: f64 = totals.iter().sum();
    let mean = sum / totals.len() as f64;
    Ok(EmissionStats {
        max: round_to(max, 3),
        min: round_to(min, 3),
        mean: round_to(mean, 3),
        sum: round_to(sum, 3),
    })
}
