//! Tests for the calendar grid invariants.

use chrono::{Datelike, NaiveDate, Weekday};
use quizboard::calendar::{month_grid, CalendarEvent, YearMonth, WORLD_DAYS};
use quizboard::holidays::Holiday;
use quizboard::quiz::QuizRecord;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn quiz(id: &str, title: &str, publish: NaiveDate) -> QuizRecord {
    QuizRecord {
        id: id.to_string(),
        title: title.to_string(),
        theme: "Histoire".to_string(),
        publish_date: publish,
        score: 100,
    }
}

#[test]
fn test_every_month_is_whole_weeks() {
    for year in [1999, 2020, 2023, 2024, 2025] {
        for month in 1..=12 {
            let reference = YearMonth::new(year, month).unwrap();
            let grid = month_grid(reference, &[], &[], &WORLD_DAYS, &[]);

            assert_eq!(grid.days.len() % 7, 0, "{} not whole weeks", reference);
            assert_eq!(grid.days.first().unwrap().date.weekday(), Weekday::Mon);
            assert_eq!(grid.days.last().unwrap().date.weekday(), Weekday::Sun);

            // Full containment of the target month.
            let first = reference.first_day().unwrap();
            let last = reference.last_day().unwrap();
            assert!(grid.days.first().unwrap().date <= first);
            assert!(grid.days.last().unwrap().date >= last);

            // Contiguity: consecutive cells are consecutive days.
            for pair in grid.days.windows(2) {
                assert_eq!(pair[1].date - pair[0].date, chrono::Duration::days(1));
            }

            // in_current_month exactly marks the target month.
            for day in &grid.days {
                assert_eq!(day.in_current_month, reference.contains(day.date));
            }
        }
    }
}

#[test]
fn test_adjacent_month_padding_lines_up() {
    for year in [2023, 2024] {
        for month in 1..=11 {
            let earlier = YearMonth::new(year, month).unwrap();
            let later = earlier.next();

            let grid_a = month_grid(earlier, &[], &[], &[], &[]);
            let grid_b = month_grid(later, &[], &[], &[], &[]);

            // Trailing padding of the earlier grid are exactly days of the
            // following month (or empty when the month ends on Sunday).
            let trailing: Vec<NaiveDate> = grid_a
                .days
                .iter()
                .filter(|d| !d.in_current_month && d.date > earlier.last_day().unwrap())
                .map(|d| d.date)
                .collect();
            for day in &trailing {
                assert!(later.contains(*day));
            }

            // Leading padding of the later grid belongs to the earlier month.
            let leading: Vec<NaiveDate> = grid_b
                .days
                .iter()
                .filter(|d| !d.in_current_month && d.date < later.first_day().unwrap())
                .map(|d| d.date)
                .collect();
            for day in &leading {
                assert!(earlier.contains(*day));
            }

            // No gap: trailing padding starts right after the earlier month,
            // leading padding ends right before the later month.
            if let Some(first_trailing) = trailing.first() {
                assert_eq!(*first_trailing, later.first_day().unwrap());
            }
            if let Some(last_leading) = leading.last() {
                assert_eq!(*last_leading, earlier.last_day().unwrap());
            }
        }
    }
}

#[test]
fn test_bastille_day_aggregates_three_sources() {
    // A quiz, a holiday and a world-day all dated July 14 land on the same
    // day, in source-category order.
    let reference = YearMonth::new(2023, 7).unwrap();
    let bastille = date(2023, 7, 14);

    let quizzes = [quiz("q1", "Quiz sur la Révolution Française", bastille)];
    let holidays = [Holiday {
        date: bastille,
        local_name: "Fête nationale".to_string(),
        name: "Bastille Day".to_string(),
    }];
    let world_days = [quizboard::calendar::WorldDay {
        month: 7,
        day: 14,
        name: "Journée test",
    }];

    let grid = month_grid(reference, &quizzes, &holidays, &world_days, &[]);
    let day = grid.day(bastille).unwrap();
    assert!(day.in_current_month);
    assert_eq!(day.events.len(), 3);
}

#[test]
fn test_june_event_only_via_leading_padding() {
    let july = YearMonth::new(2023, 7).unwrap();

    // June 10 is outside July's grid entirely.
    let outside = month_grid(july, &[quiz("q1", "Hors grille", date(2023, 6, 10))], &[], &[], &[]);
    assert_eq!(outside.event_count(), 0);

    // June 30 falls inside the leading padding week and is tagged
    // out-of-month.
    let padded = month_grid(july, &[quiz("q2", "Fin juin", date(2023, 6, 30))], &[], &[], &[]);
    let day = padded.day(date(2023, 6, 30)).unwrap();
    assert!(!day.in_current_month);
    assert_eq!(day.events.len(), 1);
}

#[test]
fn test_deleting_quiz_drops_exactly_its_event() {
    let reference = YearMonth::new(2023, 7).unwrap();
    let quizzes = vec![
        quiz("q1", "Garde", date(2023, 7, 3)),
        quiz("q2", "Supprimé", date(2023, 7, 3)),
    ];

    let before = month_grid(reference, &quizzes, &[], &[], &[]);
    assert_eq!(before.event_count(), 2);

    let remaining: Vec<QuizRecord> = quizzes.into_iter().filter(|q| q.id != "q2").collect();
    let after = month_grid(reference, &remaining, &[], &[], &[]);
    assert_eq!(after.event_count(), 1);

    let day = after.day(date(2023, 7, 3)).unwrap();
    assert_eq!(day.events[0].quiz_id.as_deref(), Some("q1"));
}

#[test]
fn test_personal_events_survive_aggregation() {
    let reference = YearMonth::new(2023, 7).unwrap();
    let personal = [CalendarEvent::personal(date(2023, 7, 20), "Rendez-vous")];

    let grid = month_grid(reference, &[], &[], &[], &personal);
    assert_eq!(grid.event_count(), 1);
    let day = grid.day(date(2023, 7, 20)).unwrap();
    assert_eq!(day.events[0].title, "Rendez-vous");
}

#[test]
fn test_empty_holidays_degrades_gracefully() {
    // Upstream fetch failure shows up here as an empty holiday slice; the
    // grid still contains the full month.
    let reference = YearMonth::new(2023, 12).unwrap();
    let grid = month_grid(reference, &[], &[], &WORLD_DAYS, &[]);
    assert!(grid.days.iter().any(|d| d.in_current_month));
    assert!(grid
        .days
        .iter()
        .all(|d| d.events.iter().all(|e| e.kind != quizboard::calendar::EventKind::Holiday)));
}
