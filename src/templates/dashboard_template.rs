use askama::Template;

use crate::models::{EmissionStats, ResultSet};
use crate::presentation::{BarChart, Column, ResultTable, TableRow};

pub struct HeaderCell {
    pub slug: &'static str,
    pub title: &'static str,
    pub marker: &'static str,
}

pub struct RowView {
    pub country: String,
    pub region: String,
    pub total: String,
    pub co2: String,
    pub ch4: String,
    pub n2o: String,
    pub year: String,
    pub source: String,
    pub hidden: bool,
}

impl From<&TableRow> for RowView {
    fn from(row: &TableRow) -> Self {
        let [country, region, total, co2, ch4, n2o, year, source] = row.cells.clone();
        Self { country, region, total, co2, ch4, n2o, year, source, hidden: !row.visible }
    }
}

pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

pub struct BarView {
    pub label: String,
    pub value: String,
    pub width: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub dark_theme: bool,
    pub api_hostname: String,
    pub version: &'static str,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub energy_input: String,
    pub input_error: String,
    pub has_input_error: bool,
    pub query: String,
    pub query_encoded: String,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
    pub visible_count: usize,
    pub stats: Vec<StatCard>,
    pub chart_title: String,
    pub bars: Vec<BarView>,
    pub has_results: bool,
    pub energy_kwh: String,
    pub calculated_at: String,
    pub fallback_count: usize,
}

crate::impl_base_template!(DashboardTemplate);

impl DashboardTemplate {
    pub fn headers_for(table: &ResultTable) -> Vec<HeaderCell> {
        Column::ALL
            .iter()
            .map(|c| HeaderCell {
                slug: c.slug(),
                title: c.header(),
                marker: table.marker(*c),
            })
            .collect()
    }

    pub fn stat_cards(stats: Option<&EmissionStats>) -> Vec<StatCard> {
        let Some(s) = stats else {
            return Vec::new();
        };
        vec![
            StatCard { label: "Highest", value: format!("{:.3} kg", s.max) },
            StatCard { label: "Lowest", value: format!("{:.3} kg", s.min) },
            StatCard { label: "Average", value: format!("{:.3} kg", s.mean) },
            StatCard { label: "Total", value: format!("{:.3} kg", s.sum) },
        ]
    }

    pub fn bar_views(chart: Option<&BarChart>) -> Vec<BarView> {
        chart
            .map(|c| {
                c.bars()
                    .into_iter()
                    .map(|b| BarView {
                        label: b.label,
                        value: format!("{:.3}", b.value),
                        width: format!("{:.1}", b.percent),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn run_summary(results: Option<&ResultSet>) -> (String, String, usize) {
        match results {
            Some(r) => (
                format!("{}", r.energy_kwh),
                r.calculated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                r.fallback_count(),
            ),
            None => (String::new(), String::new(), 0),
        }
    }
}
