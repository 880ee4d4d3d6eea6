use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use axum::{
	Json, Router,
	body::Body,
	extract::State,
	http::{Method, Request, StatusCode},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use docsearch_service::{
	DocumentSearchRequest, DocumentSearchResponse, Error as ServiceError, SummarizeRequest,
	SummarizeResponse,
};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/search/documents", post(search_documents))
		.route("/summarize", post(summarize))
		.layer(middleware::from_fn_with_state(state.clone(), track_in_flight))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_documents(
	State(state): State<AppState>,
	Json(payload): Json<DocumentSearchRequest>,
) -> Result<Json<DocumentSearchResponse>, ApiError> {
	let response = state.service.search_documents(payload).await?;

	Ok(Json(response))
}

async fn summarize(
	State(state): State<AppState>,
	Json(payload): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
	let response = state.service.summarize_article(payload).await?;

	Ok(Json(response))
}

async fn track_in_flight(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
	let method = req.method().clone();
	let path = req.uri().path().to_string();
	let _in_flight = InFlight::enter(&state.in_flight, &method, &path);
	let response = next.run(req).await;

	tracing::info!(%method, %path, status = response.status().as_u16(), "Request finished.");

	response
}

/// Counts one request as in flight until dropped, so requests cancelled mid-handler are
/// released too.
struct InFlight {
	counter: Arc<AtomicUsize>,
}
impl InFlight {
	fn enter(counter: &Arc<AtomicUsize>, method: &Method, path: &str) -> Self {
		let in_flight = counter.fetch_add(1, Ordering::SeqCst) + 1;

		tracing::info!(%method, path, in_flight, "Request started.");

		Self { counter: Arc::clone(counter) }
	}
}
impl Drop for InFlight {
	fn drop(&mut self) {
		let in_flight = self.counter.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);

		tracing::info!(in_flight, "Request released.");
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
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::StoreUnavailable { message } => {
				tracing::error!(error = %message, "Document store failed.");

				ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", message)
			},
			ServiceError::Embedding { message } => {
				tracing::error!(error = %message, "Embedding provider failed.");

				ApiError::new(StatusCode::BAD_GATEWAY, "embedding_failed", message)
			},
			ServiceError::Internal { message } => {
				tracing::error!(error = %message, "Internal error.");

				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
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
