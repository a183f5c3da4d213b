use serde::Serialize;

/// Summary figures over a result set, all in kg CO2e.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct EmissionStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub sum: f64,
}
