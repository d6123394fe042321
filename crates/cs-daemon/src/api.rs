// api.rs — HTTP routes for goal calculation and progress history.
//
// Handlers are thin: extract the requester, call the engine, map errors to
// status codes. The engine owns authorization and the save-then-notify
// sequencing; nothing here writes state directly.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use cs_goal::{Goal, GoalError, ProgressEngine, ProgressRecord, ProgressResult};
use cs_metric::MetricDefinition;
use cs_session::GameSession;

type SharedEngine = Arc<ProgressEngine>;

/// Create the daemon router.
pub fn create_router(engine: SharedEngine) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/goals", get(list_goals))
        .route("/api/sessions", get(list_sessions))
        .route("/api/metrics", get(list_metrics))
        .route("/api/goals/calculate", post(calculate))
        .route("/api/goals/{goal_id}/progress", get(goal_progress))
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    "OK"
}

// === Requester identity ===

/// The upstream-resolved requester identity, carried as an opaque header.
/// A request without it is unauthenticated, checked before anything else.
fn requester(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("x-requester")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::Unauthenticated)
}

// === Error mapping ===

/// Errors surfaced by the HTTP layer, each with a fixed status code.
enum ApiError {
    Unauthenticated,
    MissingField(&'static str),
    Goal(GoalError),
}

impl From<GoalError> for ApiError {
    fn from(e: GoalError) -> Self {
        ApiError::Goal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_string(),
            ),
            ApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("missing required field: {}", field),
            ),
            ApiError::Goal(e) => match e {
                GoalError::GoalNotFound(_)
                | GoalError::GoalInactive(_)
                | GoalError::SessionNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                GoalError::Forbidden { .. } => (StatusCode::FORBIDDEN, e.to_string()),
                other => {
                    tracing::error!("internal error: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// === Calculation ===

/// Body for `POST /api/goals/calculate`.
///
/// `session_id` is required but modeled as an Option so its absence maps
/// to a 400 with a named field instead of a generic deserialization error.
#[derive(Deserialize)]
struct CalculateRequest {
    #[serde(default)]
    session_id: Option<Uuid>,
    #[serde(default)]
    goal_id: Option<Uuid>,
}

#[derive(Serialize)]
struct CalculateResponse {
    message: String,
    results: Vec<ProgressResult>,
}

/// POST /api/goals/calculate
///
/// With `goal_id`: single-goal path, 404s are terminal. Without: the whole
/// session batch, individual goal failures are skipped by the engine.
async fn calculate(
    State(engine): State<SharedEngine>,
    headers: HeaderMap,
    Json(req): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let requester = requester(&headers)?;
    let session_id = req.session_id.ok_or(ApiError::MissingField("session_id"))?;

    let results = match req.goal_id {
        Some(goal_id) => vec![engine.calculate_goal(&requester, session_id, goal_id)?],
        None => engine.calculate_session(&requester, session_id)?,
    };

    Ok(Json(CalculateResponse {
        message: format!("calculated progress for {} goal(s)", results.len()),
        results,
    }))
}

// === Progress history ===

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Serialize)]
struct HistoryResponse {
    goal: Goal,
    progress: Vec<ProgressRecord>,
    total_count: usize,
    limit: usize,
    offset: usize,
}

/// GET /api/goals/{goal_id}/progress?limit=&offset=
async fn goal_progress(
    State(engine): State<SharedEngine>,
    headers: HeaderMap,
    Path(goal_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    requester(&headers)?;

    let goal = engine
        .goals()
        .get(goal_id)?
        .ok_or(ApiError::Goal(GoalError::GoalNotFound(goal_id)))?;

    let limit = query.limit.unwrap_or(20);
    let offset = query.offset.unwrap_or(0);
    let (progress, total_count) = engine.progress().history(goal_id, limit, offset)?;

    Ok(Json(HistoryResponse {
        goal,
        progress,
        total_count,
        limit,
        offset,
    }))
}

// === Listings ===

/// GET /api/goals
async fn list_goals(
    State(engine): State<SharedEngine>,
    headers: HeaderMap,
) -> Result<Json<Vec<Goal>>, ApiError> {
    requester(&headers)?;
    Ok(Json(engine.goals().list()?))
}

/// GET /api/sessions
async fn list_sessions(
    State(engine): State<SharedEngine>,
    headers: HeaderMap,
) -> Result<Json<Vec<GameSession>>, ApiError> {
    requester(&headers)?;
    Ok(Json(engine.sessions().list().map_err(GoalError::from)?))
}

/// GET /api/metrics
async fn list_metrics(
    State(engine): State<SharedEngine>,
    headers: HeaderMap,
) -> Result<Json<Vec<MetricDefinition>>, ApiError> {
    requester(&headers)?;
    Ok(Json(engine.catalog().all().to_vec()))
}
