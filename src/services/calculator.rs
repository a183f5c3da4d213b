use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::api::ClimatiqClient;
use crate::error::CalculationError;
use crate::models::{Region, ResultRow, ResultSet, REGIONS};

use super::estimator::estimate;

/// How region requests are issued during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// One outstanding request at a time, in catalogue order
    #[default]
    Sequential,
    /// All requests in flight at once, joined before sorting
    Concurrent,
}

impl FetchStrategy {
    pub fn from_flag(concurrent: bool) -> Self {
        if concurrent {
            FetchStrategy::Concurrent
        } else {
            FetchStrategy::Sequential
        }
    }
}

/// Parse a user-typed energy amount in kWh.
pub fn parse_energy(raw: &str) -> Result<f64, CalculationError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalculationError::InvalidInput(format!("'{}' is not a number", trimmed)))?;
    validate_energy(value)
}

/// Energy must be a finite number greater than zero.
pub fn validate_energy(energy_kwh: f64) -> Result<f64, CalculationError> {
    if !energy_kwh.is_finite() {
        return Err(CalculationError::InvalidInput(format!("{} is not a finite amount", energy_kwh)));
    }
    if energy_kwh <= 0.0 {
        return Err(CalculationError::InvalidInput(format!("{} kWh must be greater than zero", energy_kwh)));
    }
    Ok(energy_kwh)
}

/// Estimate every catalogue region and return the rows highest total first.
pub async fn calculate_for_all(
    client: &ClimatiqClient,
    energy_kwh: f64,
    strategy: FetchStrategy,
    on_progress: impl FnMut(&ResultRow),
) -> Result<ResultSet, CalculationError> {
    calculate_for(client, &REGIONS, energy_kwh, strategy, on_progress).await
}

/// Estimate the given regions. Invalid energy is rejected before any request
/// is made; every region yields exactly one row.
pub async fn calculate_for(
    client: &ClimatiqClient,
    regions: &[Region],
    energy_kwh: f64,
    strategy: FetchStrategy,
    mut on_progress: impl FnMut(&ResultRow),
) -> Result<ResultSet, CalculationError> {
    let energy_kwh = validate_energy(energy_kwh)?;
    tracing::info!(energy_kwh, regions = regions.len(), ?strategy, "Starting calculation");

    let rows = match strategy {
        FetchStrategy::Sequential => {
            let mut rows = Vec::with_capacity(regions.len());
            for region in regions {
                let est = estimate(client, region.region_code, energy_kwh).await;
                let row = ResultRow {
                    region: *region,
                    provenance: est.provenance(),
                    result: est.into_result(),
                };
                on_progress(&row);
                rows.push(row);
            }
            rows
        }
        FetchStrategy::Concurrent => {
            let mut pending: FuturesUnordered<_> = regions
                .iter()
                .enumerate()
                .map(|(index, region)| async move {
                    (index, *region, estimate(client, region.region_code, energy_kwh).await)
                })
                .collect();
            let mut indexed = Vec::with_capacity(regions.len());
            while let Some((index, region, est)) = pending.next().await {
                let row = ResultRow {
                    region,
                    provenance: est.provenance(),
                    result: est.into_result(),
                };
                on_progress(&row);
                indexed.push((index, row));
            }
            // Restore catalogue order so ties sort the same way as a sequential run
            indexed.sort_by_key(|(index, _)| *index);
            indexed.into_iter().map(|(_, row)| row).collect()
        }
    };

    let set = ResultSet::new(energy_kwh, rows);
    tracing::info!(rows = set.len(), fallbacks = set.fallback_count(), "Calculation finished");
    Ok(set)
}
