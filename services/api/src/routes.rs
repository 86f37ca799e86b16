use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use firm_exposure::error::AppError;
use firm_exposure::workflows::assessment::{
    Assessment, ComplianceBlueprint, RawAnswers, ScheduledBlueprintItem, WizardSession,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    pub(crate) answers: RawAnswers,
    /// Anchors the blueprint schedule. Defaults to today.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) assessed_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    pub(crate) assessed_on: NaiveDate,
    pub(crate) assessment: Assessment,
    pub(crate) schedule: Vec<ScheduledBlueprintItem>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BlueprintResponse {
    pub(crate) start: NaiveDate,
    pub(crate) schedule: Vec<ScheduledBlueprintItem>,
}

pub(crate) fn assessment_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/assessment", post(assessment_endpoint))
        .route("/api/v1/assessment/blueprint", get(blueprint_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Replays the submitted answers through a fresh wizard session.
pub(crate) async fn assessment_endpoint(
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let AssessmentRequest {
        answers,
        assessed_on,
    } = payload;

    let assessment = WizardSession::replay(answers)?;
    let assessed_on = assessed_on.unwrap_or_else(|| Local::now().date_naive());
    let schedule = ComplianceBlueprint::standard().schedule(assessed_on);

    Ok(Json(AssessmentResponse {
        assessed_on,
        assessment,
        schedule,
    }))
}

pub(crate) async fn blueprint_endpoint() -> Json<BlueprintResponse> {
    let start = Local::now().date_naive();

    Json(BlueprintResponse {
        start,
        schedule: ComplianceBlueprint::standard().schedule(start),
    })
}
