//! HTTP surface of the service.
//!
//! Every request runs its pipeline to completion before answering; teams are
//! fetched one at a time. Spreadsheet reads and writes run on the blocking
//! pool.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::ftc::scout::config::ScoutConfig;
use crate::ftc::scout::error::{ErrorKind, Result, ScoutError};
use crate::ftc::scout::export::{EXPORT_MESSAGE, write_export};
use crate::ftc::scout::fetch::fetch_teams;
use crate::ftc::scout::format::format_rows;
use crate::ftc::scout::ingest::ingest_files;
use crate::ftc::scout::io::graphql::ScoreSource;
use crate::ftc::scout::model::{INVALID_TEAM_NUMBERS, TeamNumberSet};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// State shared by all handlers.
pub struct AppState<S> {
    pub source: S,
    pub config: ScoutConfig,
}

impl<S> AppState<S> {
    pub fn new(source: S, config: ScoutConfig) -> Self {
        Self { source, config }
    }
}

/// Builds the application router.
pub fn router<S>(state: AppState<S>) -> Router
where
    S: ScoreSource + Send + Sync + 'static,
{
    let public_path = normalize_route(&state.config.export.public_path);

    Router::new()
        .route("/api/fetch-teams", post(fetch_teams_handler::<S>))
        .route("/api/generate-export", post(generate_export_handler::<S>))
        .route("/api/local-ingest", get(local_ingest_handler::<S>))
        .route(&public_path, get(download_export_handler::<S>))
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve<S>(addr: SocketAddr, state: AppState<S>) -> Result<()>
where
    S: ScoreSource + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, state).await
}

/// Serves on an already bound listener.
pub async fn serve_on<S>(listener: TcpListener, state: AppState<S>) -> Result<()>
where
    S: ScoreSource + Send + Sync + 'static,
{
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn fetch_teams_handler<S>(State(state): State<Arc<AppState<S>>>, body: Bytes) -> Response
where
    S: ScoreSource + Send + Sync + 'static,
{
    let teams = match parse_team_numbers(&body) {
        Ok(teams) => teams,
        Err(err) => return err.into_response(),
    };

    let records = fetch_teams(&state.source, &teams).await;
    Json(json!({ "success": true, "data": records })).into_response()
}

async fn generate_export_handler<S>(State(state): State<Arc<AppState<S>>>, body: Bytes) -> Response
where
    S: ScoreSource + Send + Sync + 'static,
{
    let teams = match parse_team_numbers(&body) {
        Ok(teams) => teams,
        Err(err) => return err.into_response(),
    };

    let records = fetch_teams(&state.source, &teams).await;
    let rows = format_rows(&records, &teams);
    let target = state.config.export.clone();

    let written = tokio::task::spawn_blocking(move || write_export(&target, rows))
        .await
        .map_err(ScoutError::from)
        .and_then(|result| result);

    match written {
        Ok(file_path) => Json(json!({
            "success": true,
            "message": EXPORT_MESSAGE,
            "filePath": file_path,
        }))
        .into_response(),
        Err(err) => err.into_response(),
    }
}

async fn local_ingest_handler<S>(State(state): State<Arc<AppState<S>>>) -> Response
where
    S: ScoreSource + Send + Sync + 'static,
{
    let paths = state.config.ingest_paths.clone();
    let files = match tokio::task::spawn_blocking(move || ingest_files(&paths)).await {
        Ok(files) => files,
        Err(err) => return ScoutError::from(err).into_response(),
    };
    if files.is_empty() {
        error!("No valid files found!");
        return Json(json!({ "success": false, "message": "No valid files found!" }))
            .into_response();
    }

    let names: Vec<&str> = files.iter().map(|file| file.file_name.as_str()).collect();
    info!(?names, "loaded files");
    Json(json!({ "success": true, "files": files })).into_response()
}

async fn download_export_handler<S>(State(state): State<Arc<AppState<S>>>) -> Response
where
    S: ScoreSource + Send + Sync + 'static,
{
    match tokio::fs::read(&state.config.export.path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, XLSX_CONTENT_TYPE)], bytes).into_response(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            StatusCode::NOT_FOUND.into_response()
        }
        Err(err) => ScoutError::from(err).into_response(),
    }
}

fn parse_team_numbers(body: &[u8]) -> Result<TeamNumberSet> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ScoutError::InvalidInput(format!("request body is not JSON: {err}")))?;
    TeamNumberSet::from_request(&value)
}

fn normalize_route(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

impl IntoResponse for ScoutError {
    fn into_response(self) -> Response {
        match self.kind() {
            ErrorKind::Validation => {
                warn!(error = %self, "rejected request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": INVALID_TEAM_NUMBERS, "details": self.to_string() })),
                )
                    .into_response()
            }
            ErrorKind::EmptyResult => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            ErrorKind::Upstream | ErrorKind::Internal => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error", "details": self.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
