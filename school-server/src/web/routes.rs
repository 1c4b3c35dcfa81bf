//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::neis::{NeisApi, NeisError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<A: NeisApi>(state: AppState<A>) -> Router {
    let api = Router::new()
        .route("/schools", get(list_schools::<A>))
        .route("/meals", get(get_meals::<A>))
        .route("/timetables", get(get_timetable::<A>));

    Router::new()
        .route("/health", get(health::<A>))
        .nest("/api/v1", api)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health<A: NeisApi>(State(state): State<AppState<A>>) -> Json<HealthResponse> {
    let status = state.directory.status().await;

    Json(HealthResponse {
        status: "healthy",
        schools_count: status.school_count,
        last_refresh: status.last_refresh,
        is_loading: status.refresh_in_progress,
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// List every school, or search by name when `q` is given.
async fn list_schools<A: NeisApi>(
    State(state): State<AppState<A>>,
    Query(req): Query<SchoolsQuery>,
) -> Result<Response, AppError> {
    match req.q {
        Some(q) => {
            let results = state
                .directory
                .search(&q)
                .await
                .map_err(|e| AppError::upstream("failed to search schools", e))?;
            Ok(Json(results.as_slice()).into_response())
        }
        None => Ok(Json(state.directory.all_schools().await).into_response()),
    }
}

/// Meals for one school and day.
async fn get_meals<A: NeisApi>(
    State(state): State<AppState<A>>,
    Query(req): Query<MealsQuery>,
) -> Result<Response, AppError> {
    let (Some(org_code), Some(school_code)) =
        (required(&req.org_code), required(&req.school_code))
    else {
        return Err(AppError::BadRequest {
            message: "org_code and school_code are required".to_string(),
        });
    };
    let date = required(&req.date).map_or_else(today, str::to_string);

    let meals = state
        .school_data
        .meals(org_code, school_code, &date)
        .await
        .map_err(|e| AppError::upstream("failed to get meals", e))?;

    Ok(Json(&*meals).into_response())
}

/// Timetable for one class and day.
async fn get_timetable<A: NeisApi>(
    State(state): State<AppState<A>>,
    Query(req): Query<TimetableQuery>,
) -> Result<Response, AppError> {
    let (Some(org_code), Some(school_code), Some(grade), Some(class)) = (
        required(&req.org_code),
        required(&req.school_code),
        required(&req.grade),
        required(&req.class),
    ) else {
        return Err(AppError::BadRequest {
            message: "org_code, school_code, grade, and class are required".to_string(),
        });
    };
    let date = required(&req.date).map_or_else(today, str::to_string);

    let timetable = state
        .school_data
        .timetable(org_code, school_code, grade, class, &date)
        .await
        .map_err(|e| AppError::upstream("failed to get timetables", e))?;

    Ok(Json(&*timetable).into_response())
}

/// Today's date in local time, as YYYYMMDD.
fn today() -> String {
    Local::now().format("%Y%m%d").to_string()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl AppError {
    /// Log an upstream failure and hide its details from the client.
    fn upstream(message: &str, e: NeisError) -> Self {
        error!(error = %e, "{message}");
        AppError::Internal {
            message: message.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
