//! Aggregated statistics over the quiz collection.
//!
//! Pure computations feeding the analytics view and the suggestion
//! prompts.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::quiz::QuizRecord;

/// Per-theme aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePerformance {
    pub theme: String,
    pub quiz_count: usize,
    pub total_score: u64,
    pub avg_score: f64,
}

/// Number of quizzes published in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

/// One point of the score-over-time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub title: String,
    pub score: u32,
}

/// Statistics over a quiz collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizStats {
    pub total_quizzes: usize,
    pub total_score: u64,
    /// Theme aggregates, best average score first.
    pub themes: Vec<ThemePerformance>,
    /// Publication counts per month, chronological.
    pub per_month: Vec<MonthlyCount>,
    /// Scores in publication order.
    pub over_time: Vec<ScorePoint>,
}

impl QuizStats {
    /// Compute statistics from a quiz collection.
    pub fn compute(quizzes: &[QuizRecord]) -> Self {
        let mut theme_totals: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
        let mut month_counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();

        for quiz in quizzes {
            let entry = theme_totals.entry(quiz.theme.as_str()).or_default();
            entry.0 += 1;
            entry.1 += u64::from(quiz.score);

            *month_counts
                .entry((quiz.publish_date.year(), quiz.publish_date.month()))
                .or_default() += 1;
        }

        let mut themes: Vec<ThemePerformance> = theme_totals
            .into_iter()
            .map(|(theme, (count, total))| ThemePerformance {
                theme: theme.to_string(),
                quiz_count: count,
                total_score: total,
                avg_score: total as f64 / count as f64,
            })
            .collect();
        themes.sort_by(|a, b| {
            b.avg_score
                .partial_cmp(&a.avg_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let per_month = month_counts
            .into_iter()
            .map(|((year, month), count)| MonthlyCount { year, month, count })
            .collect();

        let mut over_time: Vec<ScorePoint> = quizzes
            .iter()
            .map(|q| ScorePoint {
                date: q.publish_date,
                title: q.title.clone(),
                score: q.score,
            })
            .collect();
        over_time.sort_by_key(|p| p.date);

        Self {
            total_quizzes: quizzes.len(),
            total_score: quizzes.iter().map(|q| u64::from(q.score)).sum(),
            themes,
            per_month,
            over_time,
        }
    }
}

/// The `n` highest-scoring quizzes, best first.
pub fn top_quizzes(quizzes: &[QuizRecord], n: usize) -> Vec<QuizRecord> {
    let mut sorted = quizzes.to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(title: &str, theme: &str, (y, m, d): (i32, u32, u32), score: u32) -> QuizRecord {
        QuizRecord {
            id: title.to_string(),
            title: title.to_string(),
            theme: theme.to_string(),
            publish_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            score,
        }
    }

    fn sample() -> Vec<QuizRecord> {
        vec![
            quiz("Révolution", "Histoire", (2023, 7, 14), 125),
            quiz("Tarantino", "Cinéma", (2023, 9, 20), 250),
            quiz("Système solaire", "Sciences", (2023, 10, 5), 180),
            quiz("Seconde Guerre", "Histoire", (2023, 5, 8), 95),
        ]
    }

    #[test]
    fn test_theme_performance_sorted_by_average() {
        let stats = QuizStats::compute(&sample());
        assert_eq!(stats.total_quizzes, 4);
        assert_eq!(stats.themes[0].theme, "Cinéma");
        assert_eq!(stats.themes[0].avg_score, 250.0);

        let histoire = stats.themes.iter().find(|t| t.theme == "Histoire").unwrap();
        assert_eq!(histoire.quiz_count, 2);
        assert_eq!(histoire.avg_score, 110.0);
    }

    #[test]
    fn test_per_month_is_chronological() {
        let stats = QuizStats::compute(&sample());
        let months: Vec<u32> = stats.per_month.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![5, 7, 9, 10]);
    }

    #[test]
    fn test_over_time_sorted_by_date() {
        let stats = QuizStats::compute(&sample());
        assert!(stats.over_time.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(stats.over_time[0].title, "Seconde Guerre");
    }

    #[test]
    fn test_top_quizzes() {
        let top = top_quizzes(&sample(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].title, "Tarantino");
        assert_eq!(top[1].title, "Système solaire");
    }

    #[test]
    fn test_empty_collection() {
        let stats = QuizStats::compute(&[]);
        assert_eq!(stats.total_quizzes, 0);
        assert!(stats.themes.is_empty());
        assert!(top_quizzes(&[], 5).is_empty());
    }
}
