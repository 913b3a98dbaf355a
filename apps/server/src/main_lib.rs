use std::sync::Arc;

use crate::config::Config;
use greensave_core::{format::NumberLocale, settings::SimulationDefaults};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub defaults: SimulationDefaults,
    /// Locale used when a request does not ask for one.
    pub locale: NumberLocale,
    pub report_footer: Option<String>,
}

pub fn init_tracing() {
    let log_format = std::env::var("GS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let defaults = config.defaults.clone();
    tracing::info!(
        coverage_base = %defaults.coverage_base,
        saved_energy_mode = %defaults.saved_energy_mode,
        variable_share_pct = %defaults.variable_share_pct,
        points_enabled = defaults.point_value.is_some(),
        "Simulation defaults loaded"
    );

    Arc::new(AppState {
        defaults,
        locale: config.locale,
        report_footer: config.report_footer.clone(),
    })
}
