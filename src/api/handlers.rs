//! REST API request handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::analytics::QuizStats;
use crate::calendar::{upcoming_events, CalendarSession, UpcomingEvent, YearMonth, WORLD_DAYS};
use crate::error::{QuizboardError, StoreError};
use crate::holidays::HolidayClient;
use crate::quiz::{color_for_theme, NewQuiz, QuizManager, QuizRecord, QuizUpdate};
use crate::suggest::{SuggestionClient, SUGGESTION_FALLBACK};

/// Application state shared across handlers.
pub struct ApiState {
    /// Quiz collection manager.
    pub manager: Arc<QuizManager>,
    /// Holiday source.
    pub holidays: Arc<HolidayClient>,
    /// Suggestion service, absent when not configured.
    pub suggestions: Option<Arc<SuggestionClient>>,
    /// Calendar view state (reference month, personal events, holiday cache).
    pub session: RwLock<CalendarSession>,
}

impl ApiState {
    /// Create API state with the calendar opened on the current month.
    pub fn new(
        manager: Arc<QuizManager>,
        holidays: Arc<HolidayClient>,
        suggestions: Option<Arc<SuggestionClient>>,
    ) -> Self {
        let reference = YearMonth::from_date(Utc::now().date_naive());
        Self {
            manager,
            holidays,
            suggestions,
            session: RwLock::new(CalendarSession::new(reference)),
        }
    }

    /// Refresh the quiz snapshot, falling back to the cached copy when the
    /// store is unreachable so read views stay alive.
    async fn quizzes_or_cached(&self) -> Vec<QuizRecord> {
        match self.manager.refresh().await {
            Ok(quizzes) => quizzes,
            Err(err) => {
                warn!(error = %err, "store refresh failed, serving cached snapshot");
                self.manager.list().await
            }
        }
    }

    /// Upcoming holidays and world days, degrading to world days only when
    /// the holiday source is down.
    async fn upcoming(&self) -> Vec<UpcomingEvent> {
        let today = Utc::now().date_naive();
        let holidays = self.holidays.fetch_year_or_empty(today.year()).await;
        upcoming_events(&holidays, &WORLD_DAYS, today, 20)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Delete response.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteQuizResponse {
    pub success: bool,
}

/// Personal calendar event request.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonalEventRequest {
    pub date: NaiveDate,
    pub title: String,
}

/// Per-theme color assignment, for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeColor {
    pub theme: String,
    pub color: &'static str,
}

/// Analytics response.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsResponse {
    pub stats: QuizStats,
    pub theme_colors: Vec<ThemeColor>,
    pub upcoming: Vec<UpcomingEvent>,
}

/// Date suggestion request.
#[derive(Debug, Clone, Deserialize)]
pub struct DateSuggestionRequest {
    pub title: String,
}

/// Suggestion response.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    /// Markdown text, or the fixed fallback when the service failed.
    pub text: String,
}

fn error_response(err: &QuizboardError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match err {
        QuizboardError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
        QuizboardError::Store(StoreError::Conflict) => (StatusCode::CONFLICT, "conflict"),
        QuizboardError::Store(StoreError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
        QuizboardError::Store(_) => (StatusCode::BAD_GATEWAY, "store_unavailable"),
        QuizboardError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        }),
    )
}

// ============================================================================
// Quiz Handlers
// ============================================================================

/// GET /api/v1/quizzes - List all quizzes.
pub async fn list_quizzes_handler(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match state.manager.refresh().await {
        Ok(quizzes) => Json(quizzes).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

/// POST /api/v1/quizzes - Create a quiz.
pub async fn create_quiz_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<NewQuiz>,
) -> impl IntoResponse {
    match state.manager.create(request).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

/// PUT /api/v1/quizzes/:id - Update a quiz.
pub async fn update_quiz_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(request): Json<QuizUpdate>,
) -> impl IntoResponse {
    match state.manager.update(&id, request).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No quiz with id: {}", id),
                code: "not_found".to_string(),
            }),
        )
            .into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

/// DELETE /api/v1/quizzes/:id - Delete a quiz.
pub async fn delete_quiz_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.manager.delete(&id).await {
        Ok(true) => Json(DeleteQuizResponse { success: true }).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No quiz with id: {}", id),
                code: "not_found".to_string(),
            }),
        )
            .into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

// ============================================================================
// Calendar Handlers
// ============================================================================

/// GET /api/v1/calendar/:year/:month - Aggregated month grid.
pub async fn calendar_month_handler(
    State(state): State<Arc<ApiState>>,
    Path((year, month)): Path<(i32, u32)>,
) -> impl IntoResponse {
    let Some(reference) = YearMonth::new(year, month) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid month: {} (expected 1-12)", month),
                code: "invalid_month".to_string(),
            }),
        )
            .into_response();
    };

    // Navigate, then fetch holidays outside the lock; the session drops the
    // response if another request moved the view to a different year.
    let fetch_year = {
        let mut session = state.session.write().await;
        session.set_reference(reference);
        session.needs_holidays()
    };
    if let Some(year) = fetch_year {
        let holidays = state.holidays.fetch_year_or_empty(year).await;
        state.session.write().await.apply_holidays(year, holidays);
    }

    let quizzes = state.quizzes_or_cached().await;
    let grid = state.session.read().await.grid(&quizzes);
    Json(grid).into_response()
}

/// POST /api/v1/calendar/events - Add a session-local personal event.
pub async fn add_personal_event_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<PersonalEventRequest>,
) -> impl IntoResponse {
    if request.title.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: crate::error::ValidationError::MissingField("title").to_string(),
                code: "validation".to_string(),
            }),
        )
            .into_response();
    }

    let event = crate::calendar::CalendarEvent::personal(request.date, request.title.trim());
    state
        .session
        .write()
        .await
        .add_personal_event(event.date, event.title.clone());
    (StatusCode::CREATED, Json(event)).into_response()
}

// ============================================================================
// Analytics and Suggestion Handlers
// ============================================================================

/// GET /api/v1/analytics - Statistics plus upcoming events.
pub async fn analytics_handler(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let quizzes = state.quizzes_or_cached().await;
    let stats = QuizStats::compute(&quizzes);
    let theme_colors = stats
        .themes
        .iter()
        .map(|t| ThemeColor {
            theme: t.theme.clone(),
            color: color_for_theme(&t.theme),
        })
        .collect();
    let upcoming = state.upcoming().await;

    Json(AnalyticsResponse {
        stats,
        theme_colors,
        upcoming,
    })
}

/// POST /api/v1/suggestions/quizzes - New quiz ideas.
pub async fn suggest_quizzes_handler(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let Some(client) = state.suggestions.clone() else {
        return suggestions_not_configured();
    };

    let quizzes = state.quizzes_or_cached().await;
    let upcoming = state.upcoming().await;

    let text = match client.quiz_ideas(&quizzes, &upcoming).await {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "quiz suggestion request failed");
            SUGGESTION_FALLBACK.to_string()
        }
    };
    Json(SuggestionResponse { text }).into_response()
}

/// POST /api/v1/suggestions/date - Optimal publication date for a title.
pub async fn suggest_date_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<DateSuggestionRequest>,
) -> impl IntoResponse {
    let Some(client) = state.suggestions.clone() else {
        return suggestions_not_configured();
    };

    if request.title.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: crate::error::ValidationError::MissingField("title").to_string(),
                code: "validation".to_string(),
            }),
        )
            .into_response();
    }

    let upcoming = state.upcoming().await;
    let text = match client.optimal_date(request.title.trim(), &upcoming).await {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "date suggestion request failed");
            SUGGESTION_FALLBACK.to_string()
        }
    };
    Json(SuggestionResponse { text }).into_response()
}

fn suggestions_not_configured() -> axum::response::Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "Suggestion service is not configured".to_string(),
            code: "not_configured".to_string(),
        }),
    )
        .into_response()
}
