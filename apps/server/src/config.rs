use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use greensave_core::{format::NumberLocale, settings::SimulationDefaults};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Locale used when a request does not ask for one.
    pub locale: NumberLocale,
    pub defaults: SimulationDefaults,
    pub report_footer: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("GS_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid GS_LISTEN_ADDR")?;
        let cors_allow = lookup("GS_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = lookup("GS_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .parse()
            .context("Invalid GS_REQUEST_TIMEOUT_MS")?;
        let locale_tag = lookup("GS_LOCALE").unwrap_or_else(|| "pt-BR".into());
        let locale = NumberLocale::from_tag(&locale_tag)
            .ok_or_else(|| anyhow!("Unsupported GS_LOCALE '{}'", locale_tag))?;
        let defaults =
            SimulationDefaults::from_lookup(&lookup).context("Invalid simulation defaults")?;
        let report_footer = lookup("GS_REPORT_FOOTER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            locale,
            defaults,
            report_footer,
        })
    }
}
