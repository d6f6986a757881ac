//! Calendar aggregation for the month view.
//!
//! This module merges heterogeneous event sources (quiz records, public
//! holidays, world observance days and session-local personal events) into
//! a single per-day bucketed structure suitable for rendering:
//!
//! - **Month grid**: contiguous whole weeks, Monday-first, padded with
//!   adjacent-month days so the grid always covers the full target month.
//! - **Event bucketing**: every event lands on its calendar day at day
//!   granularity; events outside the grid are dropped.
//! - **Session state**: current reference month, personal events and the
//!   per-year holiday cache with a staleness guard.

mod grid;
mod session;
mod types;
mod world_days;

pub use grid::{month_grid, upcoming_events, UpcomingEvent};
pub use session::CalendarSession;
pub use types::{CalendarDay, CalendarEvent, EventKind, MonthGrid, SkippedEvent, YearMonth};
pub use world_days::{WorldDay, WORLD_DAYS};
