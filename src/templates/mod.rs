// Base template trait for shared page fields
pub mod base_template;
pub use base_template::BaseTemplate;

pub mod dashboard_template;
pub mod regions_template;

pub use dashboard_template::{BarView, DashboardTemplate, HeaderCell, RowView, StatCard};
pub use regions_template::{RegionFactorView, RegionsPageTemplate};
