use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::CalculationError;
use crate::models::AppState;
use crate::presentation::Column;
use crate::services::{calculate_for_all, parse_energy, Dashboard};
use crate::templates::{DashboardTemplate, RowView};

use super::helpers::{build_template_globals, lock_dashboard, render_template, TemplateGlobals};

pub const INVALID_ENERGY_MESSAGE: &str = "Please enter a valid energy value (kWh).";

#[derive(Deserialize, Default)]
pub struct DashboardQuery {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct CalculateForm {
    pub energy: String,
}

fn dashboard_page(
    state: &AppState,
    jar: &CookieJar,
    dashboard: &Dashboard,
    energy_input: String,
    input_error: Option<&str>,
    flash_messages: Vec<String>,
) -> DashboardTemplate {
    let TemplateGlobals {
        dark_theme,
        api_hostname,
        version,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(state, jar, flash_messages);
    let table = dashboard.table();
    let query = table.query().to_string();
    let (energy_kwh, calculated_at, fallback_count) = DashboardTemplate::run_summary(dashboard.results());
    let energy_input = if energy_input.is_empty() { energy_kwh.clone() } else { energy_input };

    DashboardTemplate {
        dark_theme,
        api_hostname,
        version,
        flash_messages,
        has_flash_messages,
        energy_input,
        input_error: input_error.unwrap_or_default().to_string(),
        has_input_error: input_error.is_some(),
        query_encoded: urlencoding::encode(&query).into_owned(),
        query,
        headers: DashboardTemplate::headers_for(table),
        rows: table.rows().iter().map(RowView::from).collect(),
        visible_count: table.visible_count(),
        stats: DashboardTemplate::stat_cards(dashboard.stats()),
        chart_title: dashboard.chart().map(|c| c.title.clone()).unwrap_or_default(),
        bars: DashboardTemplate::bar_views(dashboard.chart()),
        has_results: dashboard.has_results(),
        energy_kwh,
        calculated_at,
        fallback_count,
    }
}

pub async fn dashboard_get(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(q): Query<DashboardQuery>,
) -> Response {
    let page = {
        let mut dashboard = lock_dashboard(&state);
        dashboard.filter(q.q.as_deref().unwrap_or_default());
        dashboard_page(&state, &jar, &dashboard, String::new(), None, Vec::new())
    };
    render_template(StatusCode::OK, page)
}

pub async fn calculate_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CalculateForm>,
) -> Response {
    let energy = match parse_energy(&form.energy) {
        Ok(e) => e,
        Err(e) => {
            tracing::info!(input = %form.energy, %e, "Rejected energy input");
            let page = {
                let dashboard = lock_dashboard(&state);
                dashboard_page(&state, &jar, &dashboard, form.energy.clone(), Some(INVALID_ENERGY_MESSAGE), Vec::new())
            };
            return render_template(StatusCode::BAD_REQUEST, page);
        }
    };

    let Some(_guard) = state.try_begin_calculation() else {
        let page = {
            let dashboard = lock_dashboard(&state);
            dashboard_page(
                &state,
                &jar,
                &dashboard,
                form.energy.clone(),
                None,
                vec![CalculationError::InProgress.to_string()],
            )
        };
        return render_template(StatusCode::CONFLICT, page);
    };

    let results = match calculate_for_all(&state.estimator, energy, state.strategy, |_| {}).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(%e, "Calculation failed");
            let page = {
                let dashboard = lock_dashboard(&state);
                dashboard_page(&state, &jar, &dashboard, form.energy.clone(), None, vec![e.to_string()])
            };
            return render_template(StatusCode::BAD_REQUEST, page);
        }
    };

    if let Err(e) = lock_dashboard(&state).apply(results) {
        tracing::error!(%e, "Could not update dashboard");
    }
    Redirect::to("/").into_response()
}

pub async fn sort_get(
    State(state): State<AppState>,
    Path(column): Path<String>,
    Query(q): Query<DashboardQuery>,
) -> Response {
    match column.parse::<Column>() {
        Ok(col) => lock_dashboard(&state).sort_by(col),
        Err(e) => return (StatusCode::NOT_FOUND, e).into_response(),
    }
    let target = match q.q.as_deref().filter(|s| !s.is_empty()) {
        Some(query) => format!("/?q={}", urlencoding::encode(query)),
        None => "/".to_string(),
    };
    Redirect::to(&target).into_response()
}
