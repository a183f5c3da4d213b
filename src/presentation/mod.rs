//! Table interaction, chart model and terminal output.

pub mod chart;
pub mod table;
pub mod terminal;

pub use chart::{Bar, BarChart};
pub use table::{Column, ResultTable, SortDirection, TableRow};
