// 🌐 REST API - leaderboard over HTTP
//
// Every request pulls a fresh snapshot from the data source and recomputes;
// nothing is cached between requests. A retrieval failure becomes a single
// 502 with the error message, never a partial table.

use crate::error::LeaderboardError;
use crate::highlight::{HighlightStatus, HighlightSummary};
use crate::leaderboard::Leaderboard;
use crate::ranking::RankedTeam;
use crate::report::{format_score, DISCLAIMER};
use crate::source::DataSource;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::error;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub cap: usize,
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

fn failure(status: StatusCode, message: String) -> Response {
    (status, Json(ApiResponse::<()>::err(message))).into_response()
}

async fn load(state: &AppState) -> Result<Leaderboard, LeaderboardError> {
    let snapshot = state.source.fetch_snapshot().await?;
    Ok(Leaderboard::from_snapshot(&snapshot, state.cap))
}

async fn with_leaderboard<F, T>(state: &AppState, f: F) -> Response
where
    F: FnOnce(Leaderboard) -> T,
    T: Serialize,
{
    match load(state).await {
        Ok(board) => (StatusCode::OK, Json(ApiResponse::ok(f(board)))).into_response(),
        Err(e) => {
            error!(source = %state.source.describe(), "leaderboard computation failed: {}", e);
            failure(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/leaderboard
async fn get_leaderboard(State(state): State<AppState>) -> Response {
    with_leaderboard(&state, |board| board).await
}

/// GET /api/leaderboard/:status - qualified | provisional | none | all
async fn filter_leaderboard(
    State(state): State<AppState>,
    Path(filter): Path<String>,
) -> Response {
    let status = if filter.eq_ignore_ascii_case("all") {
        None
    } else {
        match filter.parse::<HighlightStatus>() {
            Ok(s) => Some(s),
            Err(e) => return failure(StatusCode::BAD_REQUEST, e),
        }
    };

    with_leaderboard(&state, move |board| -> Vec<RankedTeam> {
        board
            .teams
            .into_iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .collect()
    })
    .await
}

/// GET /api/summary
async fn get_summary(State(state): State<AppState>) -> Response {
    with_leaderboard(&state, |board| -> HighlightSummary { board.summary() }).await
}

/// GET /api/teams/:name - rows whose display name matches
async fn get_team(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    // Decode URL-encoded team name
    let decoded = urlencoding::decode(&name)
        .map(|n| n.into_owned())
        .unwrap_or(name);

    match load(&state).await {
        Ok(board) => {
            let matches: Vec<RankedTeam> =
                board.find_by_name(&decoded).into_iter().cloned().collect();
            if matches.is_empty() {
                failure(StatusCode::NOT_FOUND, format!("No team named {}", decoded))
            } else {
                (StatusCode::OK, Json(ApiResponse::ok(matches))).into_response()
            }
        }
        Err(e) => {
            error!("leaderboard computation failed: {}", e);
            failure(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// GET / - HTML table
async fn serve_index(State(state): State<AppState>) -> Response {
    match load(&state).await {
        Ok(board) => Html(render_html(&board)).into_response(),
        Err(e) => {
            error!("leaderboard computation failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Html(format!("<p>Error: {}</p>", escape_html(&e.to_string()))),
            )
                .into_response()
        }
    }
}

// ============================================================================
// HTML
// ============================================================================

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render_html(board: &Leaderboard) -> String {
    let mut rows = String::new();
    for team in &board.teams {
        rows.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            team.status.css_class(),
            team.rank,
            format_score(team.total_score),
            format_score(team.programming_score),
            format_score(team.driver_score),
            escape_html(team.team_number.as_deref().unwrap_or("")),
            escape_html(&team.team_name),
        ));
    }

    include_str!("../web/index.html")
        .replace("{{QUALIFIED_LABEL}}", HighlightStatus::Qualified.label())
        .replace("{{PROVISIONAL_LABEL}}", HighlightStatus::Provisional.label())
        .replace("{{DISCLAIMER}}", DISCLAIMER)
        .replace("{{ROWS}}", &rows)
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/leaderboard", get(get_leaderboard))
        .route("/leaderboard/:status", get(filter_leaderboard))
        .route("/summary", get(get_summary))
        .route("/teams/:name", get(get_team))
        .with_state(state.clone());

    Router::new()
        .route("/", get(serve_index))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
