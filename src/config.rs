use std::env;
use std::path::Path;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_URL: &str = "https://api.climatiq.io/estimate";
pub const DEFAULT_API_KEY: &str = "";
pub const DEFAULT_ACTIVITY_ID: &str = "electricity-supply_grid-source_residual_mix";
pub const DEFAULT_DATA_VERSION: &str = "^27";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_url() -> String {
    sanitize_api_url(&env::var("CLIMATIQ_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
}

pub fn get_api_key() -> String {
    env::var("CLIMATIQ_API_KEY")
        .map(|k| k.trim().to_string())
        .unwrap_or_else(|_| DEFAULT_API_KEY.to_string())
}

pub fn get_activity_id() -> String {
    non_empty_var("CLIMATIQ_ACTIVITY_ID").unwrap_or_else(|| DEFAULT_ACTIVITY_ID.to_string())
}

pub fn get_data_version() -> String {
    non_empty_var("CLIMATIQ_DATA_VERSION").unwrap_or_else(|| DEFAULT_DATA_VERSION.to_string())
}

/// Whether region requests should be fanned out concurrently instead of one at a time.
pub fn get_concurrent_requests() -> bool {
    let raw = env::var("CARBONLENS_CONCURRENT").ok();
    crate::utils::parse_flag(raw.as_deref(), false)
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn sanitize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
