use serde::Serialize;

use crate::models::ResultSet;

const PARTIAL_BLOCKS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Labels and values for the emissions bar chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// One bar, scaled against the tallest value.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Length relative to the tallest bar, 0 to 100
    pub percent: f64,
}

impl BarChart {
    pub fn from_results(results: &ResultSet) -> Self {
        Self {
            title: "CO2e Emissions (kg)".to_string(),
            labels: results
                .rows
                .iter()
                .map(|r| r.region.short_label().to_string())
                .collect(),
            values: results.rows.iter().map(|r| r.result.total_kg_co2e).collect(),
        }
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Bars on a zero-based axis.
    pub fn bars(&self) -> Vec<Bar> {
        let max = self.max_value();
        self.labels
            .iter()
            .zip(&self.values)
            .map(|(label, value)| Bar {
                label: label.clone(),
                value: *value,
                percent: if max > 0.0 { (value / max * 100.0).clamp(0.0, 100.0) } else { 0.0 },
            })
            .collect()
    }

    /// Horizontal block bars that fit within `width` columns.
    pub fn render_text(&self, width: usize) -> String {
        let label_width = self.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let values: Vec<String> = self.values.iter().map(|v| format!("{:.3}", v)).collect();
        let value_width = values.iter().map(|v| v.len()).max().unwrap_or(0);
        let bar_width = width.saturating_sub(label_width + value_width + 4).max(10);

        let mut out = String::new();
        for (bar, value) in self.bars().iter().zip(&values) {
            let eighths = (bar.percent / 100.0 * (bar_width * 8) as f64).round() as usize;
            let mut body = "█".repeat(eighths / 8);
            if eighths % 8 > 0 {
                body.push(PARTIAL_BLOCKS[eighths % 8]);
            }
            out.push_str(&format!(
                "{:>lw$} │{:<bw$} {:>vw$}\n",
                bar.label,
                body,
                value,
                lw = label_width,
                bw = bar_width,
                vw = value_width,
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(values: &[f64]) -> BarChart {
        BarChart {
            title: "t".into(),
            labels: values.iter().enumerate().map(|(i, _)| format!("R{}", i)).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_bars_scale_to_max() {
        let bars = chart(&[50.0, 25.0, 0.0]).bars();
        assert_eq!(bars[0].percent, 100.0);
        assert_eq!(bars[1].percent, 50.0);
        assert_eq!(bars[2].percent, 0.0);
    }

    #[test]
    fn test_all_zero_values_have_empty_bars() {
        assert!(chart(&[0.0, 0.0]).bars().iter().all(|b| b.percent == 0.0));
    }

    #[test]
    fn test_render_text_one_line_per_bar() {
        let text = chart(&[8.0, 4.0]).render_text(41);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("R0 │"));
        assert!(lines[0].ends_with("8.000"));
        let full = |l: &str| l.chars().filter(|c| *c == '█').count();
        assert_eq!(full(lines[0]), 2 * full(lines[1]));
    }
}
