//! Month grid construction and event bucketing.
//!
//! `month_grid` is a pure function of its inputs: no clocks, no I/O. The
//! per-day event order is the source-category insertion order (quiz,
//! holiday, world-day, personal); within one category, input order is
//! preserved. That ordering is the documented contract the views and tests
//! rely on.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::holidays::Holiday;
use crate::quiz::QuizRecord;

use super::types::{CalendarDay, CalendarEvent, EventKind, MonthGrid, SkippedEvent, YearMonth};
use super::world_days::WorldDay;

/// Build the calendar grid for a reference month.
///
/// The grid covers the 1st through the last day of the month plus
/// adjacent-month padding so that it starts on a Monday, ends on a Sunday
/// and consists of whole weeks. Events dated outside the grid range belong
/// to a different month's grid and are dropped; events that cannot be
/// instantiated at the reference year at all are reported in
/// [`MonthGrid::skipped`].
pub fn month_grid(
    reference: YearMonth,
    quizzes: &[QuizRecord],
    holidays: &[Holiday],
    world_days: &[WorldDay],
    personal: &[CalendarEvent],
) -> MonthGrid {
    let (Some(first), Some(last)) = (reference.first_day(), reference.last_day()) else {
        // Out-of-range reference month: nothing to display.
        return MonthGrid {
            reference,
            days: Vec::new(),
            skipped: Vec::new(),
        };
    };

    let start = first - Duration::days(i64::from(first.weekday().num_days_from_monday()));
    let end = last + Duration::days(i64::from(6 - last.weekday().num_days_from_monday()));

    let mut days: Vec<CalendarDay> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| CalendarDay {
            date,
            in_current_month: reference.contains(date),
            events: Vec::new(),
        })
        .collect();

    for quiz in quizzes {
        bucket(
            &mut days,
            start,
            CalendarEvent {
                date: quiz.publish_date,
                title: quiz.title.clone(),
                kind: EventKind::Quiz,
                quiz_id: Some(quiz.id.clone()),
            },
        );
    }

    for holiday in holidays {
        bucket(
            &mut days,
            start,
            CalendarEvent {
                date: holiday.date,
                title: holiday.local_name.clone(),
                kind: EventKind::Holiday,
                quiz_id: None,
            },
        );
    }

    let mut skipped = Vec::new();
    for wd in world_days {
        match NaiveDate::from_ymd_opt(reference.year, wd.month, wd.day) {
            Some(date) => bucket(
                &mut days,
                start,
                CalendarEvent {
                    date,
                    title: wd.name.to_string(),
                    kind: EventKind::WorldDay,
                    quiz_id: None,
                },
            ),
            None => skipped.push(SkippedEvent {
                title: wd.name.to_string(),
                kind: EventKind::WorldDay,
                reason: format!("no {:02}-{:02} in {}", wd.month, wd.day, reference.year),
            }),
        }
    }

    for event in personal {
        bucket(&mut days, start, event.clone());
    }

    MonthGrid {
        reference,
        days,
        skipped,
    }
}

/// Append an event to its day's bucket; dates outside the grid are dropped.
fn bucket(days: &mut [CalendarDay], grid_start: NaiveDate, event: CalendarEvent) {
    let offset = (event.date - grid_start).num_days();
    if offset < 0 {
        return;
    }
    if let Some(day) = days.get_mut(offset as usize) {
        day.events.push(event);
    }
}

/// A future holiday or world-day, used by the analytics view and the
/// suggestion prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    pub date: NaiveDate,
    pub name: String,
}

/// Merge holidays and world days into a date-sorted list of events on or
/// after `today`, capped at `limit` entries.
///
/// World days are instantiated for the current and the following year so a
/// late-December `today` still sees the January/February observances.
pub fn upcoming_events(
    holidays: &[Holiday],
    world_days: &[WorldDay],
    today: NaiveDate,
    limit: usize,
) -> Vec<UpcomingEvent> {
    let mut events: Vec<UpcomingEvent> = holidays
        .iter()
        .filter(|h| h.date >= today)
        .map(|h| UpcomingEvent {
            date: h.date,
            name: h.local_name.clone(),
        })
        .collect();

    for year in [today.year(), today.year() + 1] {
        events.extend(world_days.iter().filter_map(|wd| {
            NaiveDate::from_ymd_opt(year, wd.month, wd.day)
                .filter(|date| *date >= today)
                .map(|date| UpcomingEvent {
                    date,
                    name: wd.name.to_string(),
                })
        }));
    }

    events.sort_by_key(|e| e.date);
    events.truncate(limit);
    events
}
