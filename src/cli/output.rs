//! Terminal output helpers for CLI commands.

use quizboard::analytics::QuizStats;
use quizboard::calendar::{MonthGrid, UpcomingEvent};
use quizboard::quiz::{color_for_theme, QuizRecord};

/// Print any serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print quiz records as an aligned table.
pub fn print_quizzes(quizzes: &[QuizRecord]) {
    if quizzes.is_empty() {
        println!("No quizzes.");
        return;
    }

    println!("{:<38} {:<12} {:>6}  {:<20}  TITLE", "ID", "DATE", "SCORE", "THEME");
    for quiz in quizzes {
        println!(
            "{:<38} {:<12} {:>6}  {:<20}  {}",
            quiz.id,
            quiz.publish_date.format("%Y-%m-%d"),
            quiz.score,
            format!("{} ({})", quiz.theme, color_for_theme(&quiz.theme)),
            quiz.title,
        );
    }
    println!("\n{} quiz(zes)", quizzes.len());
}

/// Print a month grid: week rows first, then the day-by-day event list.
pub fn print_grid(grid: &MonthGrid) {
    println!("Calendar {}\n", grid.reference);
    println!(" Mon  Tue  Wed  Thu  Fri  Sat  Sun");

    for week in grid.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|day| {
                use chrono::Datelike;
                let marker = if day.events.is_empty() { ' ' } else { '*' };
                if day.in_current_month {
                    format!(" {:>2}{} ", day.date.day(), marker)
                } else {
                    format!("({:>2}{})", day.date.day(), marker)
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }

    let mut any = false;
    for day in &grid.days {
        for event in &day.events {
            if !any {
                println!("\nEvents:");
                any = true;
            }
            println!(
                "  {}  [{}] {}",
                day.date.format("%Y-%m-%d"),
                event.kind.display_name(),
                event.title,
            );
        }
    }
    if !any {
        println!("\nNo events this month.");
    }

    for skipped in &grid.skipped {
        println!("  (skipped {}: {})", skipped.title, skipped.reason);
    }
}

/// Print quiz statistics and the upcoming event list.
pub fn print_stats(stats: &QuizStats, upcoming: &[UpcomingEvent]) {
    println!("Quizzes: {}   Total score: {}\n", stats.total_quizzes, stats.total_score);

    if !stats.themes.is_empty() {
        println!("Theme performance:");
        for theme in &stats.themes {
            println!(
                "  {:<20} {:>3} quiz(zes)  avg {:>7.2}  {}",
                theme.theme,
                theme.quiz_count,
                theme.avg_score,
                color_for_theme(&theme.theme),
            );
        }
        println!();
    }

    if !stats.per_month.is_empty() {
        println!("Quizzes per month:");
        for month in &stats.per_month {
            println!("  {:04}-{:02}  {}", month.year, month.month, "#".repeat(month.count));
        }
        println!();
    }

    if !upcoming.is_empty() {
        println!("Upcoming events:");
        for event in upcoming {
            println!("  {}  {}", event.date.format("%Y-%m-%d"), event.name);
        }
    }
}
