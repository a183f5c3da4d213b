use comfy_table::{modifiers, presets, CellAlignment, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use yansi::Paint;

use super::chart::BarChart;
use super::table::{Column, ResultTable};
use crate::models::{EmissionStats, ResultSet};

const DEFAULT_WIDTH: usize = 100;

pub fn terminal_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => (w as usize).saturating_sub(4),
        None => DEFAULT_WIDTH,
    }
}

/// Build the results table from the rows currently visible.
pub fn build_table(view: &ResultTable, width: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width as u16);

    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|c| match view.marker(*c) {
            "" => c.header().to_string(),
            marker => format!("{} {}", c.header(), marker),
        })
        .collect();
    table.set_header(headers);

    for row in view.visible_rows() {
        table.add_row(row.cells.iter().map(String::as_str));
    }
    for column in Column::ALL.iter().filter(|c| c.is_numeric()) {
        if let Some(col) = table.column_mut(column.index()) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// The four summary figures, in display order.
pub fn stats_lines(stats: &EmissionStats) -> Vec<(&'static str, String)> {
    vec![
        ("Highest", format!("{:.3} kg", stats.max)),
        ("Lowest", format!("{:.3} kg", stats.min)),
        ("Average", format!("{:.3} kg", stats.mean)),
        ("Total", format!("{:.3} kg", stats.sum)),
    ]
}

pub fn print_report(results: &ResultSet, view: &ResultTable, stats: &EmissionStats, chart: &BarChart) {
    let width = terminal_width();

    println!(
        "\n{} {}",
        Paint::new("Emissions for").bold(),
        Paint::new(format!("{} kWh", results.energy_kwh)).cyan().bold()
    );
    if view.visible_count() == 0 {
        println!("\n{}", Paint::new(format!("No rows match '{}'", view.query())).yellow());
    } else {
        println!("\n{}", build_table(view, width));
    }
    if !view.query().is_empty() {
        println!(
            "{}",
            Paint::new(format!(
                "Showing {} of {} regions matching '{}'",
                view.visible_count(),
                view.rows().len(),
                view.query()
            ))
            .dim()
        );
    }

    println!();
    for (label, value) in stats_lines(stats) {
        println!("{:>8}: {}", Paint::new(label).bold(), Paint::new(value).green());
    }

    println!("\n{}", Paint::new(&chart.title).bold().underline());
    print!("{}", chart.render_text(width));

    let fallbacks = results.fallback_count();
    if fallbacks > 0 {
        println!(
            "\n{}",
            Paint::new(format!(
                "{} of {} regions used regional averages because the API was unavailable",
                fallbacks,
                results.len()
            ))
            .yellow()
        );
    }
    println!(
        "{}",
        Paint::new(format!("Calculated at {}", results.calculated_at.format("%Y-%m-%d %H:%M:%S"))).dim()
    );
}
