//! Prompt builders for the suggestion service.

use std::fmt::Write as _;

use crate::analytics::QuizStats;
use crate::calendar::UpcomingEvent;
use crate::quiz::QuizRecord;

fn upcoming_section(upcoming: &[UpcomingEvent]) -> String {
    if upcoming.is_empty() {
        return "- (no upcoming events known)".to_string();
    }
    upcoming
        .iter()
        .map(|e| format!("- {}: {}", e.date.format("%Y-%m-%d"), e.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt asking for new quiz ideas, grounded in past performance and the
/// upcoming event calendar.
pub fn quiz_ideas_prompt(
    stats: &QuizStats,
    top: &[QuizRecord],
    upcoming: &[UpcomingEvent],
) -> String {
    let mut themes = String::new();
    for t in &stats.themes {
        let _ = writeln!(themes, "- Theme: {}, average score: {:.2}", t.theme, t.avg_score);
    }
    if themes.is_empty() {
        themes.push_str("- (no past quizzes)\n");
    }

    let mut best = String::new();
    for q in top {
        let _ = writeln!(best, "- Title: {}, theme: {}, score: {}", q.title, q.theme, q.score);
    }
    if best.is_empty() {
        best.push_str("- (none yet)\n");
    }

    format!(
        "You are an expert content strategist specialized in engaging quizzes.\n\
         Based on the data below, suggest 3 to 5 new quiz ideas. For each idea\n\
         give a catchy title, a theme and a short description. Prioritize\n\
         topics tied to the upcoming events.\n\n\
         ## Past performance by theme:\n{themes}\n\
         ## Highest-scoring quizzes:\n{best}\n\
         ## Upcoming events:\n{upcoming}\n\n\
         Answer in Markdown.",
        themes = themes.trim_end(),
        best = best.trim_end(),
        upcoming = upcoming_section(upcoming),
    )
}

/// Prompt asking for the most strategic publication date for one quiz.
pub fn optimal_date_prompt(title: &str, upcoming: &[UpcomingEvent]) -> String {
    format!(
        "You are an expert content strategist. Suggest the best publication\n\
         date for a new quiz.\n\n\
         ## Quiz title:\n\"{title}\"\n\n\
         ## Upcoming events over the next months:\n{upcoming}\n\n\
         Analyze the event list and suggest the most strategic date to\n\
         publish this quiz, with a short justification. If no event is\n\
         relevant, suggest a generally favorable date (for example a\n\
         weekend) and say that no specific event matched. Answer in\n\
         Markdown.",
        upcoming = upcoming_section(upcoming),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_quiz_ideas_prompt_includes_data() {
        let quizzes = vec![QuizRecord {
            id: "q1".to_string(),
            title: "Le système solaire".to_string(),
            theme: "Sciences".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2023, 10, 5).unwrap(),
            score: 180,
        }];
        let stats = QuizStats::compute(&quizzes);
        let upcoming = vec![UpcomingEvent {
            date: NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(),
            name: "Halloween".to_string(),
        }];

        let prompt = quiz_ideas_prompt(&stats, &quizzes, &upcoming);
        assert!(prompt.contains("Sciences"));
        assert!(prompt.contains("Le système solaire"));
        assert!(prompt.contains("2023-10-31: Halloween"));
    }

    #[test]
    fn test_optimal_date_prompt_handles_empty_events() {
        let prompt = optimal_date_prompt("Quiz de Noël", &[]);
        assert!(prompt.contains("Quiz de Noël"));
        assert!(prompt.contains("no upcoming events known"));
    }
}
