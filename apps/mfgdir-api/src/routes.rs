use axum::{
	Json, Router,
	extract::{
		Path, State,
		rejection::{JsonRejection, PathRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use uuid::Uuid;

use mfgdir_service::{CompanyRequest, Error, SearchRequest, SearchResponse};
use mfgdir_storage::models::Company;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			Error::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage failure while serving a request.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"INTERNAL_ERROR",
					"Internal error.",
					None,
				)
			},
		}
	}
}
impl From<JsonRejection> for ApiError {
	fn from(err: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text(), None)
	}
}
impl From<PathRejection> for ApiError {
	fn from(err: PathRejection) -> Self {
		Self::new(
			StatusCode::BAD_REQUEST,
			"INVALID_REQUEST",
			err.body_text(),
			Some(vec!["company_id".to_string()]),
		)
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/companies/search", post(search))
		.route("/v1/companies/{company_id}", get(company))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn company(
	State(state): State<AppState>,
	company_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Company>, ApiError> {
	let Path(company_id) = company_id?;
	let response = state.service.company(CompanyRequest { company_id }).await?;

	Ok(Json(response))
}
