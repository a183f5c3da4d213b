use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::ClimatiqClient;
use crate::services::{Dashboard, FetchStrategy};

#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<ClimatiqClient>,
    /// Latest results, table view and chart; replaced at the end of each run.
    pub dashboard: Arc<Mutex<Dashboard>>,
    pub calculation_running: Arc<AtomicBool>,
    pub strategy: FetchStrategy,
    pub api_hostname: String,
    pub custom_css: Option<String>,
}

impl AppState {
    pub fn new(estimator: ClimatiqClient, strategy: FetchStrategy) -> Self {
        let api_hostname = crate::utils::hostname_from_url(estimator.endpoint());
        Self {
            estimator: Arc::new(estimator),
            dashboard: Arc::new(Mutex::new(Dashboard::default())),
            calculation_running: Arc::new(AtomicBool::new(false)),
            strategy,
            api_hostname,
            custom_css: None,
        }
    }

    /// Claim the single calculation slot. Returns `None` if a run is in flight.
    pub fn try_begin_calculation(&self) -> Option<CalculationGuard> {
        self.calculation_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CalculationGuard {
                flag: Arc::clone(&self.calculation_running),
            })
    }
}

/// Releases the calculation slot when dropped.
pub struct CalculationGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for CalculationGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
