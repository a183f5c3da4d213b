use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::{ResultRow, ResultSet};

/// The eight columns of the results table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Country,
    Region,
    Total,
    Co2,
    Ch4,
    N2o,
    Year,
    Source,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Country,
        Column::Region,
        Column::Total,
        Column::Co2,
        Column::Ch4,
        Column::N2o,
        Column::Year,
        Column::Source,
    ];

    pub fn index(&self) -> usize {
        match self {
            Column::Country => 0,
            Column::Region => 1,
            Column::Total => 2,
            Column::Co2 => 3,
            Column::Ch4 => 4,
            Column::N2o => 5,
            Column::Year => 6,
            Column::Source => 7,
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Country => "Country",
            Column::Region => "Region",
            Column::Total => "Total CO2e (kg)",
            Column::Co2 => "CO2 (kg)",
            Column::Ch4 => "CH4 (kg)",
            Column::N2o => "N2O (kg)",
            Column::Year => "Year",
            Column::Source => "Source",
        }
    }

    /// Identifier used on the command line and in URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            Column::Country => "country",
            Column::Region => "region",
            Column::Total => "total",
            Column::Co2 => "co2",
            Column::Ch4 => "ch4",
            Column::N2o => "n2o",
            Column::Year => "year",
            Column::Source => "source",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Total | Column::Co2 | Column::Ch4 | Column::N2o)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Column::ALL.iter().map(|c| c.slug()).collect();
                format!("unknown column '{}' (expected one of: {})", s.trim(), names.join(", "))
            })
    }
}

/// Direction of the current sort, shown as a marker next to the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn marker(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// One displayed row: formatted cell text plus filter visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: [String; 8],
    pub visible: bool,
}

impl TableRow {
    pub fn from_result(row: &ResultRow) -> Self {
        let r = &row.result;
        Self {
            cells: [
                format!("{} {}", row.region.flag_label, row.region.name),
                row.region.region_code.to_string(),
                format!("{:.3}", r.total_kg_co2e),
                format!("{:.3}", r.co2_kg),
                format!("{:.5}", r.ch4_kg),
                format!("{:.5}", r.n2o_kg),
                r.year.clone(),
                r.source.clone(),
            ],
            visible: true,
        }
    }

    pub fn cell(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }

    /// All cell text, as matched by the live filter.
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }
}

/// Sortable, filterable view over a result set.
///
/// Sorting reorders the displayed rows and filtering only toggles their
/// visibility; the underlying [`ResultSet`] is never touched.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    rows: Vec<TableRow>,
    sorted: Option<(Column, SortDirection)>,
    query: String,
}

impl ResultTable {
    pub fn from_results(results: &ResultSet) -> Self {
        Self {
            rows: results.rows.iter().map(TableRow::from_result).collect(),
            sorted: None,
            query: String::new(),
        }
    }

    /// Sort ascending by `column`. Sorting the same column again gives the
    /// reverse order, then the next call starts ascending again.
    pub fn sort_by(&mut self, column: Column) {
        self.rows.sort_by(|a, b| compare_cells(column, a.cell(column), b.cell(column)));
        let direction = match self.sorted {
            Some((c, SortDirection::Ascending)) if c == column => {
                self.rows.reverse();
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sorted = Some((column, direction));
    }

    /// Hide rows whose text does not contain `query`, ignoring case.
    pub fn filter(&mut self, query: &str) {
        self.query = query.to_string();
        let needle = query.to_lowercase();
        for row in &mut self.rows {
            row.visible = row.text().to_lowercase().contains(&needle);
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    pub fn last_sorted(&self) -> Option<(Column, SortDirection)> {
        self.sorted
    }

    /// Marker for `column`'s header: empty unless the table is sorted by it.
    pub fn marker(&self, column: Column) -> &'static str {
        match self.sorted {
            Some((c, direction)) if c == column => direction.marker(),
            _ => "",
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn compare_cells(column: Column, a: &str, b: &str) -> Ordering {
    if column.is_numeric() {
        let x: f64 = a.trim().parse().unwrap_or(f64::NAN);
        let y: f64 = b.trim().parse().unwrap_or(f64::NAN);
        x.total_cmp(&y)
    } else {
        locale_cmp(a.trim(), b.trim())
    }
}

/// Case-insensitive ordering with an exact tiebreak, close to a
/// locale-aware collation for the ASCII names used here.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_from_str() {
        assert_eq!("Total".parse::<Column>(), Ok(Column::Total));
        assert_eq!(" n2o ".parse::<Column>(), Ok(Column::N2o));
        assert!("flag".parse::<Column>().is_err());
    }

    #[test]
    fn test_numeric_columns() {
        let numeric: Vec<Column> = Column::ALL.iter().copied().filter(|c| c.is_numeric()).collect();
        assert_eq!(numeric, vec![Column::Total, Column::Co2, Column::Ch4, Column::N2o]);
    }

    #[test]
    fn test_numeric_compare_is_not_lexical() {
        assert_eq!(compare_cells(Column::Total, "9.000", "10.000"), Ordering::Less);
        assert_eq!(compare_cells(Column::Region, "9", "10"), Ordering::Greater);
    }

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("brazil", "Canada"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Greater);
    }
}
