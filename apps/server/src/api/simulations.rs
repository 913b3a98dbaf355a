use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use greensave_core::{
    format::NumberLocale,
    report::{build_report, latin1_safe, SimulationReport},
    savings::{compute, CalculationInput, CalculationResult},
    settings::SimulationDefaults,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{FormattedSummary, SimulationRequest, SimulationResponse},
};

/// A request merged with the defaults and run through the calculator.
struct Simulation {
    input: CalculationInput,
    result: CalculationResult,
    locale: NumberLocale,
}

fn run_simulation(
    state: &AppState,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> ApiResult<Simulation> {
    let Json(request) = payload?;
    let locale = request.locale_or(state.locale).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Unsupported locale '{}'",
            request.locale.as_deref().unwrap_or_default()
        ))
    })?;
    let input = request.to_input(&state.defaults)?.normalized();
    let result = compute(&input);
    tracing::debug!(
        period_months = input.period_months,
        coverage_base = %input.coverage_base,
        saved_energy_mode = %input.saved_energy_mode,
        monthly_savings = %result.monthly_savings,
        "Simulation computed"
    );
    Ok(Simulation {
        input,
        result,
        locale,
    })
}

impl Simulation {
    fn report(&self, state: &AppState) -> SimulationReport {
        build_report(&self.input, &self.result, &self.locale)
            .with_footer(state.report_footer.clone())
    }
}

#[utoipa::path(get, path = "/api/v1/simulations/defaults", responses((status = 200, description = "Default simulation parameters")))]
async fn get_defaults(State(state): State<Arc<AppState>>) -> Json<SimulationDefaults> {
    Json(state.defaults.clone())
}

#[utoipa::path(post, path = "/api/v1/simulations", request_body = SimulationRequest, responses((status = 200, body = SimulationResponse), (status = 400, description = "Invalid request")))]
async fn simulate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> ApiResult<Json<SimulationResponse>> {
    let simulation = run_simulation(&state, payload)?;
    let formatted = FormattedSummary::new(&simulation.result, &simulation.locale);
    Ok(Json(SimulationResponse {
        input: simulation.input,
        result: simulation.result,
        formatted,
    }))
}

#[utoipa::path(post, path = "/api/v1/simulations/report", request_body = SimulationRequest, responses((status = 200, description = "Report sections as JSON"), (status = 400, description = "Invalid request")))]
async fn simulation_report(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> ApiResult<Json<SimulationReport>> {
    let simulation = run_simulation(&state, payload)?;
    Ok(Json(simulation.report(&state)))
}

#[utoipa::path(post, path = "/api/v1/simulations/report.txt", request_body = SimulationRequest, responses((status = 200, description = "Plain-text report"), (status = 400, description = "Invalid request")))]
async fn simulation_report_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> ApiResult<String> {
    let simulation = run_simulation(&state, payload)?;
    Ok(latin1_safe(&simulation.report(&state).to_plain_text()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/simulations", post(simulate))
        .route("/simulations/defaults", get(get_defaults))
        .route("/simulations/report", post(simulation_report))
        .route("/simulations/report.txt", post(simulation_report_text))
}
