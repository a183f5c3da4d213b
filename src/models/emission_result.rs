use chrono::{DateTime, Local};
use serde::Serialize;

use super::region::Region;
use crate::utils::round_to;

/// Share of total CO2e attributed to CO2 when the API gives no breakdown.
pub const CO2_SHARE: f64 = 0.98;
/// Share of total CO2e attributed to CH4 when the API gives no breakdown.
pub const CH4_SHARE: f64 = 0.001;
/// Share of total CO2e attributed to N2O when the API gives no breakdown.
pub const N2O_SHARE: f64 = 0.0005;

/// Emission figures for one region, in kg.
///
/// Totals and CO2 are kept to 3 decimals, CH4 and N2O to 5.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmissionResult {
    pub region_code: String,
    pub total_kg_co2e: f64,
    pub co2_kg: f64,
    pub ch4_kg: f64,
    pub n2o_kg: f64,
    pub year: String,
    pub source: String,
}

impl EmissionResult {
    pub fn new(
        region_code: &str,
        total: f64,
        co2: f64,
        ch4: f64,
        n2o: f64,
        year: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            region_code: region_code.to_string(),
            total_kg_co2e: round_to(total, 3),
            co2_kg: round_to(co2, 3),
            ch4_kg: round_to(ch4, 5),
            n2o_kg: round_to(n2o, 5),
            year: year.into(),
            source: source.into(),
        }
    }

    /// Build a result whose gas breakdown is approximated from the total.
    pub fn from_total(
        region_code: &str,
        total: f64,
        year: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self::new(
            region_code,
            total,
            total * CO2_SHARE,
            total * CH4_SHARE,
            total * N2O_SHARE,
            year,
            source,
        )
    }
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Api,
    Fallback,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Api => "api",
            Provenance::Fallback => "fallback",
        }
    }
}

/// A catalogue region paired with its estimate.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultRow {
    pub region: Region,
    pub result: EmissionResult,
    pub provenance: Provenance,
}

/// All rows from one calculation run, highest total first.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    pub energy_kwh: f64,
    pub calculated_at: DateTime<Local>,
    pub rows: Vec<ResultRow>,
}

impl ResultSet {
    /// Collect rows and order them by descending total.
    pub fn new(energy_kwh: f64, rows: Vec<ResultRow>) -> Self {
        let mut set = Self {
            energy_kwh,
            calculated_at: Local::now(),
            rows,
        };
        set.sort_descending();
        set
    }

    /// Stable sort, so equal totals keep their request order.
    pub fn sort_descending(&mut self) {
        self.rows
            .sort_by(|a, b| b.result.total_kg_co2e.total_cmp(&a.result.total_kg_co2e));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn totals(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.result.total_kg_co2e).collect()
    }

    pub fn fallback_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.provenance == Provenance::Fallback)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::REGIONS;

    fn row(index: usize, total: f64) -> ResultRow {
        let region = REGIONS[index];
        ResultRow {
            region,
            result: EmissionResult::from_total(region.region_code, total, "2024", "test"),
            provenance: Provenance::Fallback,
        }
    }

    #[test]
    fn test_from_total_rounds_each_gas() {
        let r = EmissionResult::from_total("DE", 35.0, "2024", "x");
        assert_eq!(r.total_kg_co2e, 35.0);
        assert_eq!(r.co2_kg, 34.3);
        assert_eq!(r.ch4_kg, 0.035);
        assert_eq!(r.n2o_kg, 0.0175);
    }

    #[test]
    fn test_new_sorts_descending() {
        let set = ResultSet::new(1.0, vec![row(0, 1.0), row(1, 3.0), row(2, 2.0)]);
        assert_eq!(set.totals(), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let set = ResultSet::new(1.0, vec![row(0, 2.0), row(1, 2.0), row(2, 5.0)]);
        let codes: Vec<&str> = set.rows.iter().map(|r| r.region.region_code).collect();
        assert_eq!(codes, vec!["DE", "IN", "US-MI"]);
    }

    #[test]
    fn test_sort_descending_twice_matches_once() {
        let mut set = ResultSet::new(1.0, vec![row(0, 4.0), row(1, 9.0), row(2, 4.0), row(3, 1.0)]);
        let once = set.rows.clone();
        set.sort_descending();
        assert_eq!(set.rows, once);
    }
}
