//! Web API module for RolodexGen.
//!
//! This module exposes the parser and package generator over HTTP so a
//! browser frontend can drive the wizard.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/themes` - List app themes
//! - `POST /api/parse?filename=NAME` - Parse an uploaded CSV/TSV body
//! - `POST /api/generate` - Generate the zip package from a JSON config
//! - `POST /api/generate/app` - Generate only the app source
//!
//! Generation bodies that omit `theme` get the server's `defaults.theme`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::branding::APP_DISPLAY_NAME;
use crate::cli::{theme_list, ThemeInfo};
use crate::config::Config;
use crate::generator::{self, AssetSource, GenerateError};
use crate::models::{GenerationConfig, Row, PREVIEW_ROWS};
use crate::parser::{self, UploadError};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Static assets packed into generated archives
    assets: Arc<dyn AssetSource>,
}

impl AppState {
    /// Creates state using the asset source selected by `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let assets: Arc<dyn AssetSource> = Arc::from(config.asset_source(None));
        Self {
            config: Arc::new(config),
            assets,
        }
    }

    /// Creates state with an explicit asset source.
    #[must_use]
    pub fn with_assets(config: Config, assets: Arc<dyn AssetSource>) -> Self {
        Self {
            config: Arc::new(config),
            assets,
        }
    }

    /// Returns the application configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
}

/// Theme list response.
#[derive(Debug, Serialize)]
pub struct ThemeListResponse {
    /// Available themes.
    pub themes: Vec<ThemeInfo>,
    /// Theme preselected by the server configuration.
    pub default: String,
}

/// Query parameters for the parse endpoint.
#[derive(Debug, Deserialize)]
pub struct ParseQuery {
    /// Original file name, used for type checks.
    pub filename: String,
    /// Number of preview rows to return.
    pub rows: Option<usize>,
}

/// Parse response.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    /// Column names in file order.
    pub columns: Vec<String>,
    /// Detected delimiter ("comma" or "tab").
    pub delimiter: String,
    /// Number of data rows.
    pub row_count: usize,
    /// First rows of the table.
    pub preview: Vec<Row>,
}

/// API error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

impl From<UploadError> for ApiError {
    fn from(error: UploadError) -> Self {
        Self::new(error.to_string())
    }
}

/// Maps a generation failure to a status code. Config problems are the
/// client's fault; asset and archive failures are the server's.
fn generate_error_response(error: GenerateError) -> (StatusCode, Json<ApiError>) {
    let status = match error {
        GenerateError::Config(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ApiError::with_details("Generation failed", error.to_string())),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: APP_DISPLAY_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/themes - List app themes.
async fn list_themes(State(state): State<AppState>) -> Json<ThemeListResponse> {
    Json(ThemeListResponse {
        themes: theme_list(),
        default: state.config.defaults.theme.to_string(),
    })
}

/// POST /api/parse - Parse an uploaded CSV/TSV body.
async fn parse_upload(
    Query(query): Query<ParseQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<ParseResponse>> {
    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let table = parser::parse_upload(&query.filename, mime, &body)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ApiError::from(e))))?;

    if table.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("No header row found in upload")),
        ));
    }

    let preview = table.preview(query.rows.unwrap_or(PREVIEW_ROWS)).to_vec();
    Ok(Json(ParseResponse {
        delimiter: table.delimiter.to_string(),
        row_count: table.row_count(),
        columns: table.columns,
        preview,
    }))
}

/// Deserializes a posted generation config, filling in the server's default
/// theme when the body leaves `theme` out.
fn generation_config(state: &AppState, mut body: Value) -> ApiResult<GenerationConfig> {
    if let Value::Object(fields) = &mut body {
        if !fields.contains_key("theme") {
            if let Ok(theme) = serde_json::to_value(state.config.defaults.theme) {
                fields.insert("theme".to_string(), theme);
            }
        }
    }

    serde_json::from_value(body).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::with_details("Invalid generation config", e.to_string())),
        )
    })
}

/// POST /api/generate - Generate the zip package.
async fn generate_package(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Response> {
    let config = generation_config(&state, body)?;
    let assets = Arc::clone(&state.assets);
    let package = tokio::task::spawn_blocking(move || generator::generate(&config, assets.as_ref()))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::with_details("Generation task failed", e.to_string())),
            )
        })?
        .map_err(generate_error_response)?;

    info!(
        archive = %package.archive_file_name,
        bytes = package.archive.len(),
        "Served package"
    );

    download(
        "application/zip",
        &package.archive_file_name,
        package.archive,
    )
}

/// POST /api/generate/app - Generate only the app source.
async fn generate_app_source(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Response> {
    let config = generation_config(&state, body)?;
    let (file_name, source) = generator::generate_app(&config).map_err(generate_error_response)?;
    download("text/plain; charset=utf-8", &file_name, source.into_bytes())
}

fn download(content_type: &str, file_name: &str, bytes: Vec<u8>) -> ApiResult<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .body(Body::from(bytes))
        .map(IntoResponse::into_response)
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::with_details("Failed to create response", e.to_string())),
            )
        })
}

// ============================================================================
// Router
// ============================================================================

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the server is meant to run locally next to the frontend.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/themes", get(list_themes))
        .route("/api/parse", post(parse_upload))
        .route("/api/generate", post(generate_package))
        .route("/api/generate/app", post(generate_app_source))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config);
    let app = create_router(state);

    info!("Starting {APP_DISPLAY_NAME} web server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
