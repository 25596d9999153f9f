//! HTTP binding for the request handler.
//!
//! Responses are JSON; page rendering is left to whatever sits in front of
//! this server. Store I/O is synchronous, so every handler call runs on the
//! blocking pool.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, RawForm, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::handler::{PageRequest, RequestHandler, SearchSection, SubmitOutcome};
use crate::record::FormOptions;
use crate::storage::RecordStore;
use crate::validate::RawSubmission;

/// Handler shared across requests.
pub type SharedHandler<S> = Arc<RequestHandler<S>>;

/// Query string accepted by the page and search routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Search query.
    #[serde(default)]
    pub q: Option<String>,
}

/// Error response wrapper.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        error!("Request failed: {err}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Build the application router.
pub fn router<S: RecordStore + 'static>(handler: SharedHandler<S>) -> Router {
    Router::new()
        .route("/", get(show_page::<S>).post(submit_form::<S>))
        .route(
            "/api/records",
            get(list_records::<S>).post(create_record::<S>),
        )
        .route("/api/search", get(search_records::<S>))
        .route("/api/options", get(form_options))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve<S: RecordStore + 'static>(
    handler: SharedHandler<S>,
    addr: SocketAddr,
) -> Result<()> {
    let server_error = |source: std::io::Error| Error::Server {
        addr: addr.to_string(),
        source,
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(server_error)?;
    let local = listener.local_addr().map_err(server_error)?;
    info!("Listening on http://{local}");

    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(server_error)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

/// Run a handler call on the blocking pool.
async fn run_blocking<S, T, F>(handler: SharedHandler<S>, f: F) -> Result<T>
where
    S: RecordStore + 'static,
    T: Send + 'static,
    F: FnOnce(&RequestHandler<S>) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&handler))
        .await
        .map_err(|err| Error::internal(format!("blocking task failed: {err}")))?
}

fn outcome_status(outcome: Option<&SubmitOutcome>) -> StatusCode {
    match outcome {
        Some(SubmitOutcome::Rejected { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    }
}

async fn show_page<S: RecordStore + 'static>(
    State(handler): State<SharedHandler<S>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Response> {
    let request = PageRequest {
        submission: None,
        query: params.q,
    };
    let view = run_blocking(handler, move |h| h.page(request)).await?;
    Ok(Json(view).into_response())
}

async fn submit_form<S: RecordStore + 'static>(
    State(handler): State<SharedHandler<S>>,
    Query(params): Query<SearchParams>,
    RawForm(body): RawForm,
) -> ApiResult<Response> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&body)
        .map_err(|err| ApiError::bad_request(format!("malformed form body: {err}")))?;

    let request = PageRequest {
        submission: Some(RawSubmission::from_pairs(pairs)),
        query: params.q,
    };
    let view = run_blocking(handler, move |h| h.page(request)).await?;
    let status = outcome_status(view.submission.as_ref());
    Ok((status, Json(view)).into_response())
}

async fn create_record<S: RecordStore + 'static>(
    State(handler): State<SharedHandler<S>>,
    Json(raw): Json<RawSubmission>,
) -> ApiResult<Response> {
    let outcome = run_blocking(handler, move |h| h.submit(raw)).await?;
    let response = match outcome {
        SubmitOutcome::Saved { record } => {
            (StatusCode::CREATED, Json(json!({ "record": record }))).into_response()
        }
        SubmitOutcome::Rejected { errors } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": errors })),
        )
            .into_response(),
    };
    Ok(response)
}

async fn list_records<S: RecordStore + 'static>(
    State(handler): State<SharedHandler<S>>,
) -> ApiResult<Response> {
    let records = run_blocking(handler, |h| Ok(h.list())).await?;
    Ok(Json(records).into_response())
}

async fn search_records<S: RecordStore + 'static>(
    State(handler): State<SharedHandler<S>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Response> {
    let section = run_blocking(handler, move |h| Ok(h.query(params.q.as_deref()))).await?;
    let section = section.unwrap_or_else(|| SearchSection {
        query: String::new(),
        matches: Vec::new(),
        no_matches: false,
    });
    Ok(Json(section).into_response())
}

async fn form_options() -> Json<FormOptions> {
    Json(FormOptions::default())
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
