use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use std::sync::{MutexGuard, PoisonError};

use crate::models::AppState;
use crate::services::Dashboard;

pub const THEME_COOKIE: &str = "theme";

pub fn dark_theme_from_jar(jar: &CookieJar) -> bool {
    jar.get(THEME_COOKIE).map(|c| c.value() == "dark").unwrap_or(false)
}

#[derive(Default)]
pub struct TemplateGlobals {
    pub dark_theme: bool,
    pub api_hostname: String,
    pub version: &'static str,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
}

pub fn build_template_globals(state: &AppState, jar: &CookieJar, flash_messages: Vec<String>) -> TemplateGlobals {
    let has_flash_messages = !flash_messages.is_empty();
    TemplateGlobals {
        dark_theme: dark_theme_from_jar(jar),
        api_hostname: state.api_hostname.clone(),
        version: env!("CARGO_PKG_VERSION"),
        flash_messages,
        has_flash_messages,
    }
}

pub fn render_template<T: askama::Template>(status: StatusCode, t: T) -> Response {
    match t.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// Lock the dashboard. A panic in another handler leaves the data intact,
/// so a poisoned lock is still usable.
pub fn lock_dashboard(state: &AppState) -> MutexGuard<'_, Dashboard> {
    state.dashboard.lock().unwrap_or_else(PoisonError::into_inner)
}
