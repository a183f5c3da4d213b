use axum::{extract::State, http::StatusCode, response::Response};
use axum_extra::extract::cookie::CookieJar;

use crate::models::{AppState, REGIONS};
use crate::services::fallback::{fallback_factor, DEFAULT_FACTOR};
use crate::templates::{RegionFactorView, RegionsPageTemplate};

use super::helpers::{build_template_globals, render_template, TemplateGlobals};

pub async fn regions_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let TemplateGlobals {
        dark_theme,
        api_hostname,
        version,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar, Vec::new());
    let regions = REGIONS
        .iter()
        .map(|r| RegionFactorView {
            name: r.name,
            flag_label: r.flag_label,
            region_code: r.region_code,
            factor: format!("{:.2}", fallback_factor(r.region_code)),
        })
        .collect();
    render_template(
        StatusCode::OK,
        RegionsPageTemplate {
            dark_theme,
            api_hostname,
            version,
            flash_messages,
            has_flash_messages,
            regions,
            default_factor: format!("{:.2}", DEFAULT_FACTOR),
        },
    )
}
