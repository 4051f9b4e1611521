use std::{any::Any, collections::HashMap};

use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use cutoff_domain::{
	facet::FacetOptionSet, pagination::Pagination, params::RecordQuery, record::RankRecord,
	statistics::Statistics,
};

use cutoff_service::Resolution;

use crate::state::AppState;

const RECORDS_FAILED: &str = "Internal server error";
const FACETS_FAILED: &str = "Failed to fetch filter options";
const STATISTICS_FAILED: &str = "Failed to fetch statistics";
const PANICKED: &str = "Something went wrong!";
const ROUTE_NOT_FOUND: &str = "Route not found";

pub fn router(state: AppState) -> Router {
	let expose_error_detail = state.expose_error_detail;
	let cors_permissive = state.cors_permissive;
	let router = Router::new()
		.route("/health", get(health))
		.route("/records", get(records))
		.route("/facets", get(facets))
		.route("/statistics", get(statistics))
		.route("/api/cet-data", get(records))
		.route("/api/filter-options", get(facets))
		.route("/api/statistics", get(statistics))
		.fallback(not_found)
		.layer(TraceLayer::new_for_http())
		.layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
			let detail = expose_error_detail.then(|| panic_message(panic.as_ref()));

			ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, PANICKED, detail).into_response()
		}))
		.with_state(state);

	if cors_permissive { router.layer(CorsLayer::permissive()) } else { router }
}

#[derive(Debug, Serialize)]
struct RecordsResponse {
	success: bool,
	data: Vec<RankRecord>,
	pagination: Pagination,
	#[serde(skip_serializing_if = "Option::is_none")]
	statistics: Option<Statistics>,
}

#[derive(Debug, Serialize)]
struct FacetsResponse {
	success: bool,
	filters: FacetOptionSet,
}

#[derive(Debug, Serialize)]
struct StatisticsResponse {
	success: bool,
	statistics: Statistics,
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn records(
	State(state): State<AppState>,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<RecordsResponse>, ApiError> {
	let query = RecordQuery::from_params(&params, &state.service.cfg);
	let (page, statistics) = if wants_summary(&params) {
		let (page, statistics) = state.service.fetch_page_with_summary(&query).await;

		(page, Some(statistics))
	} else {
		(state.service.fetch_page(&query).await, None)
	};
	let upstream = |err| ApiError::upstream(RECORDS_FAILED, err, state.expose_error_detail);
	let page = page.into_result().map_err(upstream)?;
	let statistics = statistics.map(Resolution::into_result).transpose().map_err(upstream)?;

	Ok(Json(RecordsResponse {
		success: true,
		data: page.records,
		pagination: page.pagination,
		statistics,
	}))
}

async fn facets(State(state): State<AppState>) -> Result<Json<FacetsResponse>, ApiError> {
	let filters = state
		.service
		.list_facet_values()
		.await
		.into_result()
		.map_err(|err| ApiError::upstream(FACETS_FAILED, err, state.expose_error_detail))?;

	Ok(Json(FacetsResponse { success: true, filters }))
}

async fn statistics(State(state): State<AppState>) -> Result<Json<StatisticsResponse>, ApiError> {
	let statistics = state
		.service
		.summarize()
		.await
		.into_result()
		.map_err(|err| ApiError::upstream(STATISTICS_FAILED, err, state.expose_error_detail))?;

	Ok(Json(StatisticsResponse { success: true, statistics }))
}

fn wants_summary(params: &HashMap<String, String>) -> bool {
	params.get("summary").is_some_and(|value| matches!(value.trim(), "true" | "1"))
}

async fn not_found() -> ApiError {
	ApiError::new(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND, None)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
	if let Some(message) = panic.downcast_ref::<String>() {
		message.clone()
	} else if let Some(message) = panic.downcast_ref::<&str>() {
		message.to_string()
	} else {
		"Unknown panic.".to_string()
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	success: bool,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
	detail: Option<String>,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
		Self { status, message: message.into(), detail }
	}

	fn upstream(message: &str, err: cutoff_service::Error, expose_detail: bool) -> Self {
		Self::new(
			StatusCode::INTERNAL_SERVER_ERROR,
			message,
			expose_detail.then(|| err.to_string()),
		)
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { success: false, message: self.message, error: self.detail };

		(self.status, Json(body)).into_response()
	}
}
