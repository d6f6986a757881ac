//! Session state for the calendar view.
//!
//! Owns the current reference month, the session-local personal events and
//! the per-year holiday cache. Holidays arrive asynchronously; a response
//! for a year the user has since navigated away from must not corrupt the
//! current grid, so [`CalendarSession::apply_holidays`] drops stale results.

use chrono::NaiveDate;

use crate::holidays::Holiday;
use crate::quiz::QuizRecord;

use super::grid::month_grid;
use super::types::{CalendarEvent, MonthGrid, YearMonth};
use super::world_days::WORLD_DAYS;

/// Mutable state behind one calendar view.
#[derive(Debug)]
pub struct CalendarSession {
    reference: YearMonth,
    personal_events: Vec<CalendarEvent>,
    /// Holidays cached for one year, for the lifetime of this session.
    holidays: Option<(i32, Vec<Holiday>)>,
}

impl CalendarSession {
    /// Create a session showing the given month.
    pub fn new(reference: YearMonth) -> Self {
        Self {
            reference,
            personal_events: Vec::new(),
            holidays: None,
        }
    }

    /// The month currently displayed.
    pub fn reference(&self) -> YearMonth {
        self.reference
    }

    /// Navigate to an arbitrary month. The holiday cache survives within
    /// the same year and is invalidated across years.
    pub fn set_reference(&mut self, reference: YearMonth) {
        if reference.year != self.reference.year {
            self.holidays = None;
        }
        self.reference = reference;
    }

    /// Navigate to the following month.
    pub fn go_next_month(&mut self) -> YearMonth {
        self.set_reference(self.reference.next());
        self.reference
    }

    /// Navigate to the preceding month.
    pub fn go_prev_month(&mut self) -> YearMonth {
        self.set_reference(self.reference.prev());
        self.reference
    }

    /// The year holidays should be fetched for, or `None` when the cache
    /// already covers the current reference year.
    pub fn needs_holidays(&self) -> Option<i32> {
        match &self.holidays {
            Some((year, _)) if *year == self.reference.year => None,
            _ => Some(self.reference.year),
        }
    }

    /// Accept a holiday fetch result. Returns false and leaves the cache
    /// untouched when the response is stale (the user navigated to a
    /// different year while the request was in flight).
    pub fn apply_holidays(&mut self, year: i32, holidays: Vec<Holiday>) -> bool {
        if year != self.reference.year {
            tracing::debug!(year, current = self.reference.year, "dropping stale holiday response");
            return false;
        }
        self.holidays = Some((year, holidays));
        true
    }

    /// Add a session-local personal event.
    pub fn add_personal_event(&mut self, date: NaiveDate, title: impl Into<String>) {
        self.personal_events.push(CalendarEvent::personal(date, title));
    }

    /// Personal events added during this session.
    pub fn personal_events(&self) -> &[CalendarEvent] {
        &self.personal_events
    }

    /// Build the grid for the current month from the given quiz records,
    /// the cached holidays (empty when unavailable) and the world-day table.
    pub fn grid(&self, quizzes: &[QuizRecord]) -> MonthGrid {
        let holidays = match &self.holidays {
            Some((year, list)) if *year == self.reference.year => list.as_slice(),
            _ => &[],
        };
        month_grid(
            self.reference,
            quizzes,
            holidays,
            &WORLD_DAYS,
            &self.personal_events,
        )
    }
}
