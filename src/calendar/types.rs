//! Calendar types for the month view.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// Reference Month
// ============================================================================

/// A (year, month) pair identifying which month a grid displays.
///
/// `month` is 1-12; values outside that range never produce grid days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Create a reference month. Returns `None` when `month` is not 1-12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The reference month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month, `None` when the month is out of range.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month, `None` when the month is out of range.
    pub fn last_day(&self) -> Option<NaiveDate> {
        let first = self.first_day()?;
        first.checked_add_months(Months::new(1))?.checked_sub_days(Days::new(1))
    }

    /// The following month.
    pub fn next(&self) -> Self {
        if self.month >= 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// The preceding month.
    pub fn prev(&self) -> Self {
        if self.month <= 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// Whether the given date falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ============================================================================
// Events
// ============================================================================

/// Source category of a calendar event.
///
/// The per-day ordering contract follows the declaration order here:
/// quiz, holiday, world-day, personal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Quiz,
    Holiday,
    WorldDay,
    Personal,
}

impl EventKind {
    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            EventKind::Quiz => "Quiz",
            EventKind::Holiday => "Holiday",
            EventKind::WorldDay => "World day",
            EventKind::Personal => "Personal",
        }
    }
}

/// A single dated entry on the calendar, derived fresh on every aggregation
/// pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Calendar date at day granularity.
    pub date: NaiveDate,
    /// Display title.
    pub title: String,
    /// Source category.
    pub kind: EventKind,
    /// Back-reference to the quiz record when `kind` is `Quiz`. Non-owning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<String>,
}

impl CalendarEvent {
    /// Create a session-local personal event.
    pub fn personal(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            kind: EventKind::Personal,
            quiz_id: None,
        }
    }
}

/// An event that could not be placed on the grid, kept for diagnostics
/// instead of being silently swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEvent {
    pub title: String,
    pub kind: EventKind,
    pub reason: String,
}

// ============================================================================
// Grid
// ============================================================================

/// One cell of the month grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading/trailing padding days of adjacent months.
    pub in_current_month: bool,
    /// Events for this date, in source-category order.
    pub events: Vec<CalendarEvent>,
}

/// A complete month view: contiguous whole weeks covering the reference
/// month plus enough adjacent-month padding to start on Monday and end on
/// Sunday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthGrid {
    /// The month this grid displays.
    pub reference: YearMonth,
    /// Grid cells in date order; the length is always a multiple of 7.
    pub days: Vec<CalendarDay>,
    /// Events that could not be instantiated for this reference month.
    pub skipped: Vec<SkippedEvent>,
}

impl MonthGrid {
    /// Look up the cell for a date, if it lies inside the grid.
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        let first = self.days.first()?.date;
        let offset = (date - first).num_days();
        if offset < 0 {
            return None;
        }
        self.days.get(offset as usize)
    }

    /// Iterate the grid one week at a time.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }

    /// Total number of events placed on the grid.
    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }
}
