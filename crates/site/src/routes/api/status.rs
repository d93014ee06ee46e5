//! System status endpoint.
//!
//! Reports which integrations are configured. The report is computed from
//! the loaded configuration only; database connectivity is probed by
//! `/health/ready` instead.

use axum::{
    Json,
    extract::State,
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::config::SiteConfig;
use crate::state::AppState;

/// Aggregate system state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Operational,
    Degraded,
}

/// State of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentStatus {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "configured")]
    Configured,
    #[serde(rename = "not configured")]
    NotConfigured,
}

#[derive(Debug, Clone, Serialize)]
pub struct Component {
    pub status: ComponentStatus,
    pub message: &'static str,
}

impl Component {
    const fn configured(ok: bool, configured: &'static str, missing: &'static str) -> Self {
        if ok {
            Self {
                status: ComponentStatus::Configured,
                message: configured,
            }
        } else {
            Self {
                status: ComponentStatus::NotConfigured,
                message: missing,
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Components {
    pub api: Component,
    pub database: Component,
    pub auth: Component,
    pub stripe: Component,
}

#[derive(Debug, Clone, Serialize)]
pub struct Deployment {
    pub hosted: bool,
    pub region: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuntimeInfo {
    pub runtime: &'static str,
    pub deployment: Deployment,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub status: OverallStatus,
    pub timestamp: String,
    pub version: &'static str,
    pub environment: &'static str,
    pub components: Components,
    pub config: RuntimeInfo,
}

impl StatusReport {
    /// Build the report for `config` at `now`.
    ///
    /// The payment provider is optional: a missing Stripe key never degrades
    /// the overall status.
    #[must_use]
    pub fn from_config(config: &SiteConfig, now: DateTime<Utc>) -> Self {
        let components = Components {
            api: Component {
                status: ComponentStatus::Healthy,
                message: "API is responding",
            },
            database: Component::configured(
                config.database_url.is_some(),
                "Database URL is set",
                "DATABASE_URL is missing",
            ),
            auth: Component::configured(
                config.auth.is_configured(),
                "Auth is configured",
                "Auth configuration is incomplete",
            ),
            stripe: Component::configured(
                config.payments.is_configured(),
                "Stripe is configured",
                "Stripe keys are missing",
            ),
        };

        let degraded = [&components.api, &components.database, &components.auth]
            .iter()
            .any(|c| c.status == ComponentStatus::NotConfigured);

        Self {
            status: if degraded {
                OverallStatus::Degraded
            } else {
                OverallStatus::Operational
            },
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            version: env!("CARGO_PKG_VERSION"),
            environment: config.environment.as_str(),
            components,
            config: RuntimeInfo {
                runtime: "rust",
                deployment: Deployment {
                    hosted: config.region.is_some(),
                    region: config
                        .region
                        .clone()
                        .unwrap_or_else(|| "unknown".to_string()),
                },
            },
        }
    }
}

/// `GET /api/status`. Always 200, never cached.
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let report = StatusReport::from_config(state.config(), Utc::now());
    if report.status == OverallStatus::Degraded {
        tracing::warn!(components = ?report.components, "System status degraded");
    }
    ([(CACHE_CONTROL, "no-store, max-age=0")], Json(report))
}
