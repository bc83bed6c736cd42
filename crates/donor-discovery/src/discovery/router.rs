use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::criteria::SearchCriteria;
use super::service::{DiscoveryServiceError, DonorDiscoveryService};
use super::source::{DonorSource, SourceError};
use crate::snapshot::SnapshotError;

/// Router builder exposing donor search and export endpoints.
pub fn discovery_router<S>(service: Arc<DonorDiscoveryService<S>>) -> Router
where
    S: DonorSource + 'static,
{
    Router::new()
        .route("/api/v1/donors", get(list_handler::<S>))
        .route("/api/v1/donors/search", post(search_handler::<S>))
        .route("/api/v1/donors/export.csv", get(export_csv_handler::<S>))
        .route("/api/v1/donors/export.json", get(export_json_handler::<S>))
        .with_state(service)
}

/// Evaluation date for eligibility; defaults to the server's local date.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClockParams {
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

impl ClockParams {
    fn resolve(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(default)]
    pub(crate) criteria: SearchCriteria,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<DonorDiscoveryService<S>>>,
    Query(criteria): Query<SearchCriteria>,
    Query(clock): Query<ClockParams>,
) -> Response
where
    S: DonorSource + 'static,
{
    match service.search(&criteria, clock.resolve()) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<DonorDiscoveryService<S>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    S: DonorSource + 'static,
{
    let clock = ClockParams {
        today: request.today,
    };
    match service.search(&request.criteria, clock.resolve()) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_csv_handler<S>(
    State(service): State<Arc<DonorDiscoveryService<S>>>,
    Query(criteria): Query<SearchCriteria>,
) -> Response
where
    S: DonorSource + 'static,
{
    match service.export_csv(&criteria) {
        Ok(body) => attachment(body, "text/csv; charset=utf-8", "csv"),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_json_handler<S>(
    State(service): State<Arc<DonorDiscoveryService<S>>>,
    Query(criteria): Query<SearchCriteria>,
) -> Response
where
    S: DonorSource + 'static,
{
    match service.export_json(&criteria) {
        Ok(body) => attachment(body, "application/json", "json"),
        Err(err) => error_response(err),
    }
}

fn attachment(body: String, content_type: &str, extension: &str) -> Response {
    let today = Local::now().date_naive();
    let disposition = format!("attachment; filename=\"donors-{today}.{extension}\"");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn error_response(err: DiscoveryServiceError) -> Response {
    let status = match &err {
        DiscoveryServiceError::Source(SourceError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        DiscoveryServiceError::Source(SourceError::Malformed(_)) => StatusCode::BAD_GATEWAY,
        DiscoveryServiceError::Export(SnapshotError::Empty) => StatusCode::NOT_FOUND,
        DiscoveryServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
