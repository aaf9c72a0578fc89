use axum::{
	Json, Router,
	extract::State,
	http::{Method, StatusCode, header},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use exgrip_domain::criteria::QueryCriteria;
use exgrip_service::search::SearchOutcome;

use crate::state::AppState;

/// Body of the 404 returned when a query matches nothing.
pub const NO_MATCH_MESSAGE: &str = "No items found matching the criteria.";

pub fn router(state: AppState) -> Router {
	let cors = CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([Method::GET, Method::POST])
		.allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

	Router::new()
		.route("/health", get(health))
		.route("/process-data", post(process_data))
		.layer(cors)
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn process_data(
	State(state): State<AppState>,
	Json(payload): Json<QueryCriteria>,
) -> Result<Response, ApiError> {
	match state.service.search(&payload).await? {
		SearchOutcome::Matches(matches) => Ok(Json(matches).into_response()),
		SearchOutcome::NoMatches => Ok((
			StatusCode::NOT_FOUND,
			Json(serde_json::json!({ "message": NO_MATCH_MESSAGE })),
		)
			.into_response()),
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<exgrip_service::Error> for ApiError {
	fn from(err: exgrip_service::Error) -> Self {
		match &err {
			exgrip_service::Error::InvalidRequest { .. } => Self {
				status: StatusCode::BAD_REQUEST,
				error_code: "invalid_request".to_string(),
				message: err.to_string(),
			},
			exgrip_service::Error::Store { .. } => Self {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				error_code: "store_error".to_string(),
				message: err.to_string(),
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };
		(self.status, Json(body)).into_response()
	}
}
