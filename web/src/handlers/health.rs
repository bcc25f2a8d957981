//! Health endpoint.
//!
//! Reports the terminal state of the bootstrap phase. A degraded start is
//! not an outage — the process serves — but operators need to see it.

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use serde::Serialize;
use souq_bootstrap::BootReport;

/// Health response body.
#[derive(Debug, Serialize)]
pub struct HealthBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    degraded_phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    degraded_step: Option<&'static str>,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(health_body(&state.boot))
}

fn health_body(report: &BootReport) -> HealthBody {
    match report.failure() {
        None => HealthBody {
            status: "ready",
            degraded_phase: None,
            degraded_step: None,
        },
        Some(failure) => HealthBody {
            status: "degraded",
            degraded_phase: Some(failure.phase.to_string()),
            degraded_step: Some(failure.step),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use souq_bootstrap::{BootPhase, ContainedFailure};

    #[test]
    fn ready_report_serializes_minimal_body() {
        let body = serde_json::to_value(health_body(&BootReport::Ready)).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "ready" }));
    }

    #[test]
    fn degraded_report_names_phase_and_step() {
        let report = BootReport::Degraded(ContainedFailure {
            phase: BootPhase::Seeding,
            step: "identity-baseline",
            error: anyhow::anyhow!("store unreachable"),
        });

        let body = serde_json::to_value(health_body(&report)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": "degraded",
                "degraded_phase": "seeding",
                "degraded_step": "identity-baseline",
            })
        );
    }
}
