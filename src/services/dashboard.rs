use crate::error::CalculationError;
use crate::models::{EmissionStats, ResultSet};
use crate::presentation::{BarChart, Column, ResultTable};

use super::stats::compute_stats;

/// Everything the presentation layer shows for the latest calculation.
///
/// A new run replaces the results, stats, table view and chart together.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    results: Option<ResultSet>,
    stats: Option<EmissionStats>,
    table: ResultTable,
    chart: Option<BarChart>,
}

impl Dashboard {
    /// Build a dashboard for a single run.
    pub fn from_results(results: ResultSet) -> Result<Self, CalculationError> {
        let mut dashboard = Self::default();
        dashboard.apply(results)?;
        Ok(dashboard)
    }

    pub fn apply(&mut self, results: ResultSet) -> Result<(), CalculationError> {
        let stats = compute_stats(&results)?;
        let table = ResultTable::from_results(&results);
        let chart = BarChart::from_results(&results);
        *self = Self {
            results: Some(results),
            stats: Some(stats),
            table,
            chart: Some(chart),
        };
        Ok(())
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn stats(&self) -> Option<&EmissionStats> {
        self.stats.as_ref()
    }

    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    pub fn chart(&self) -> Option<&BarChart> {
        self.chart.as_ref()
    }

    pub fn sort_by(&mut self, column: Column) {
        self.table.sort_by(column);
    }

    pub fn filter(&mut self, query: &str) {
        self.table.filter(query);
    }

    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }
}
