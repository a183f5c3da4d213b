use crate::api::{ClimatiqClient, EstimationError};
use crate::models::{EmissionResult, Provenance};

use super::fallback::fallback_estimate;

/// Outcome of estimating one region: straight from the API, or computed
/// locally because the API could not give a usable answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Api(EmissionResult),
    Fallback {
        result: EmissionResult,
        reason: EstimationError,
    },
}

impl Estimate {
    pub fn result(&self) -> &EmissionResult {
        match self {
            Estimate::Api(result) => result,
            Estimate::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> EmissionResult {
        match self {
            Estimate::Api(result) => result,
            Estimate::Fallback { result, .. } => result,
        }
    }

    pub fn provenance(&self) -> Provenance {
        match self {
            Estimate::Api(_) => Provenance::Api,
            Estimate::Fallback { .. } => Provenance::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Estimate::Fallback { .. })
    }
}

/// Estimate one region. Always yields a result; API failures fall back to
/// the regional average table. `energy_kwh` must already be validated.
pub async fn estimate(client: &ClimatiqClient, region_code: &str, energy_kwh: f64) -> Estimate {
    match client.fetch(region_code, energy_kwh).await {
        Ok(result) => {
            tracing::debug!(region = region_code, total = result.total_kg_co2e, "Estimate from API");
            Estimate::Api(result)
        }
        Err(reason) => {
            tracing::warn!(region = region_code, %reason, "Estimate failed, using regional average");
            Estimate::Fallback {
                result: fallback_estimate(region_code, energy_kwh),
                reason,
            }
        }
    }
}
