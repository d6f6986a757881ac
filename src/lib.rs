//! Quizboard: quiz planning dashboard service
//!
//! Manages a collection of quiz records over interchangeable storage
//! backends, aggregates them with public holidays and fixed world
//! observance days into Monday-first calendar grids, computes analytics
//! over the collection and fetches AI-generated content suggestions.

pub mod analytics;
pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod holidays;
pub mod quiz;
pub mod store;
pub mod suggest;

pub use analytics::{MonthlyCount, QuizStats, ScorePoint, ThemePerformance};
pub use api::{create_rest_router, ApiState, RestApiConfig};
pub use calendar::{
    month_grid, upcoming_events, CalendarDay, CalendarEvent, CalendarSession, EventKind, MonthGrid,
    SkippedEvent, UpcomingEvent, WorldDay, YearMonth, WORLD_DAYS,
};
pub use config::Config;
pub use error::{
    ConfigError, HolidayError, QuizboardError, Result, StoreError, SuggestionError, ValidationError,
};
pub use holidays::{Holiday, HolidayClient};
pub use quiz::{color_for_theme, NewQuiz, QuizManager, QuizRecord, QuizUpdate, NEUTRAL_THEME_COLOR};
pub use store::{DocumentStore, MemoryStore, QuizStore, RestTableStore};
pub use suggest::{SuggestionClient, SUGGESTION_FALLBACK};
