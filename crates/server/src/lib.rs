//! # chartsheet-server
//!
//! HTTP API over the chartsheet upload pipeline.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /health` | liveness and version |
//! | `POST /upload?name=..` | validate, parse and store a spreadsheet |
//! | `GET /preview?page=&page_size=` | one page of the current upload |
//! | `GET /chart/defaults` | default chart settings for the current upload |
//! | `POST /chart` | build a chart from a chart config |

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chartsheet_core::sheet::{PreviewOptions, SheetError};
use chartsheet_core::viz::{ChartConfig, ChartError, ChartSpec};
use chartsheet_core::{
    chart_current_file, default_config, CoreError, IncomingFile, SessionStore, UploadedFile,
    Uploader,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub uploader: Arc<Uploader>,
    pub store: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(uploader: Uploader, store: impl SessionStore + 'static) -> Self {
        Self {
            uploader: Arc::new(uploader),
            store: Arc::new(store),
        }
    }
}

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error body returned by every failing route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Pipeline error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl<E: Into<CoreError>> From<E> for ApiError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            CoreError::Sheet(SheetError::InvalidFileType { .. }) => StatusCode::BAD_REQUEST,
            CoreError::Sheet(SheetError::FileTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            CoreError::Sheet(SheetError::Parse(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::Chart(e) if e.is_config() => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::Chart(ChartError::UnsupportedChartType(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CoreError::UploadInProgress => StatusCode::CONFLICT,
            CoreError::NoCurrentFile => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub name: String,
    pub user: Option<String>,
}

/// What the client learns about an accepted upload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub row_count: usize,
}

impl From<&UploadedFile> for UploadSummary {
    fn from(file: &UploadedFile) -> Self {
        Self {
            id: file.id.clone(),
            name: file.name.clone(),
            size: file.size,
            sheet_name: file.data.sheet_name.clone(),
            headers: file.data.headers.clone(),
            row_count: file.data.row_count(),
        }
    }
}

/// Media type declared by the client, without parameters.
fn declared_media_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    let media_type = value.split(';').next().unwrap_or(value).trim();
    (!media_type.is_empty()).then(|| media_type.to_string())
}

async fn upload(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<UploadSummary>> {
    let file = IncomingFile::new(query.name, declared_media_type(&headers), body.to_vec());
    let user = query.user.unwrap_or_default();
    let uploaded = state.uploader.upload(file, &user).await?;
    state.store.save_current_file(&uploaded)?;
    Ok(Json(UploadSummary::from(&uploaded)))
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    /// Page number, starting at 1
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

async fn preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> ApiResult<Response> {
    let file = state
        .store
        .load_current_file()?
        .ok_or(CoreError::NoCurrentFile)?;
    let mut options = PreviewOptions::default();
    if let Some(page_size) = query.page_size {
        options = options.with_page_size(page_size);
    }
    let page_index = query.page.unwrap_or(1).saturating_sub(1);
    Ok(Json(file.data.preview(page_index, &options)).into_response())
}

async fn chart_defaults(State(state): State<AppState>) -> ApiResult<Json<ChartConfig>> {
    Ok(Json(default_config(state.store.as_ref())?))
}

async fn chart(
    State(state): State<AppState>,
    Json(config): Json<ChartConfig>,
) -> ApiResult<Json<ChartSpec>> {
    Ok(Json(chart_current_file(state.store.as_ref(), &config)?))
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(state: AppState) -> Router {
    // One byte over the limit so oversized uploads reach the validator and
    // get its message instead of a bare 413.
    let body_limit = usize::try_from(state.uploader.limits().max_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(1);

    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/preview", get(preview))
        .route("/chart/defaults", get(chart_defaults))
        .route("/chart", post(chart))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
