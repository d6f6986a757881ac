//! CLI command implementations.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use chrono::{NaiveDate, Utc};
use tracing::warn;

use quizboard::calendar::{upcoming_events, CalendarSession, UpcomingEvent, YearMonth, WORLD_DAYS};
use quizboard::config::Config;
use quizboard::holidays::HolidayClient;
use quizboard::quiz::{NewQuiz, QuizManager, QuizUpdate};
use quizboard::suggest::{SuggestionClient, SUGGESTION_FALLBACK};
use quizboard::{create_rest_router, store, ApiState, RestApiConfig};

use super::output;

fn build_manager(config: &Config) -> anyhow::Result<Arc<QuizManager>> {
    let store = store::from_config(&config.store)?;
    Ok(Arc::new(QuizManager::new(store)))
}

async fn fetch_upcoming(config: &Config) -> Vec<UpcomingEvent> {
    let today = Utc::now().date_naive();
    match HolidayClient::from_config(&config.holidays) {
        Ok(client) => {
            use chrono::Datelike;
            let holidays = client.fetch_year_or_empty(today.year()).await;
            upcoming_events(&holidays, &WORLD_DAYS, today, 20)
        }
        Err(err) => {
            warn!(error = %err, "holiday client unavailable");
            upcoming_events(&[], &WORLD_DAYS, today, 20)
        }
    }
}

/// Run the REST API server.
pub async fn run_serve(config: Config, port: Option<u16>) -> anyhow::Result<()> {
    let port = port.unwrap_or(config.server.http_port);

    let manager = build_manager(&config)?;
    if let Err(err) = manager.refresh().await {
        warn!(error = %err, "initial quiz fetch failed, starting with an empty list");
    }

    let holidays = Arc::new(HolidayClient::from_config(&config.holidays)?);
    let suggestions = match SuggestionClient::from_config(&config.suggestions) {
        Ok(client) => Some(Arc::new(client)),
        Err(err) => {
            warn!(error = %err, "suggestion service disabled");
            None
        }
    };

    let state = Arc::new(ApiState::new(manager, holidays, suggestions));
    let router = create_rest_router(state, &RestApiConfig::default());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Quizboard REST API listening on http://{}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}

/// Quiz CRUD commands.
#[allow(clippy::too_many_arguments)]
pub async fn run_quizzes(
    config: Config,
    action: String,
    id: Option<String>,
    title: Option<String>,
    theme: Option<String>,
    date: Option<String>,
    score: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let manager = build_manager(&config)?;

    match action.as_str() {
        "list" => {
            let quizzes = manager.refresh().await?;
            if json {
                output::print_json(&quizzes)?;
            } else {
                output::print_quizzes(&quizzes);
            }
        }
        "add" => {
            let title = title.ok_or_else(|| anyhow!("--title is required for add"))?;
            let date = parse_date(&date.ok_or_else(|| anyhow!("--date is required for add"))?)?;
            let new = NewQuiz::new(title, theme.unwrap_or_default(), date)
                .with_score(score.unwrap_or(0));

            manager.refresh().await?;
            let record = manager.create(new).await?;
            if json {
                output::print_json(&record)?;
            } else {
                println!("Created quiz {} ({})", record.title, record.id);
            }
        }
        "update" => {
            let id = id.ok_or_else(|| anyhow!("--id is required for update"))?;
            let update = QuizUpdate {
                title,
                theme,
                publish_date: date.as_deref().map(parse_date).transpose()?,
                score,
            };

            manager.refresh().await?;
            match manager.update(&id, update).await? {
                Some(record) => {
                    if json {
                        output::print_json(&record)?;
                    } else {
                        println!("Updated quiz {} ({})", record.title, record.id);
                    }
                }
                None => bail!("no quiz with id: {}", id),
            }
        }
        "delete" => {
            let id = id.ok_or_else(|| anyhow!("--id is required for delete"))?;
            manager.refresh().await?;
            if manager.delete(&id).await? {
                println!("Deleted quiz {}", id);
            } else {
                bail!("no quiz with id: {}", id);
            }
        }
        other => bail!("unknown action: {} (expected list, add, update or delete)", other),
    }

    Ok(())
}

/// Render the aggregated month grid.
pub async fn run_calendar(config: Config, month: Option<String>, json: bool) -> anyhow::Result<()> {
    let reference = match month {
        Some(value) => parse_month(&value)?,
        None => YearMonth::from_date(Utc::now().date_naive()),
    };

    let manager = build_manager(&config)?;
    let quizzes = match manager.refresh().await {
        Ok(quizzes) => quizzes,
        Err(err) => {
            warn!(error = %err, "quiz fetch failed, rendering calendar without quizzes");
            Vec::new()
        }
    };

    let mut session = CalendarSession::new(reference);
    if let Some(year) = session.needs_holidays() {
        match HolidayClient::from_config(&config.holidays) {
            Ok(client) => {
                session.apply_holidays(year, client.fetch_year_or_empty(year).await);
            }
            Err(err) => warn!(error = %err, "holiday client unavailable"),
        }
    }

    let grid = session.grid(&quizzes);
    if json {
        output::print_json(&grid)?;
    } else {
        output::print_grid(&grid);
    }
    Ok(())
}

/// Show quiz statistics and upcoming events.
pub async fn run_analytics(config: Config, json: bool) -> anyhow::Result<()> {
    let manager = build_manager(&config)?;
    let quizzes = manager.refresh().await?;

    let stats = quizboard::analytics::QuizStats::compute(&quizzes);
    let upcoming = fetch_upcoming(&config).await;

    if json {
        output::print_json(&serde_json::json!({ "stats": stats, "upcoming": upcoming }))?;
    } else {
        output::print_stats(&stats, &upcoming);
    }
    Ok(())
}

/// Ask the suggestion service for quiz ideas or a publication date.
pub async fn run_suggest(
    config: Config,
    action: String,
    title: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let client = SuggestionClient::from_config(&config.suggestions)
        .context("suggestion service is not configured")?;

    let upcoming = fetch_upcoming(&config).await;

    let text = match action.as_str() {
        "ideas" => {
            let manager = build_manager(&config)?;
            let quizzes = manager.refresh().await.unwrap_or_else(|err| {
                warn!(error = %err, "quiz fetch failed, suggesting without history");
                Vec::new()
            });
            match client.quiz_ideas(&quizzes, &upcoming).await {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, "suggestion request failed");
                    SUGGESTION_FALLBACK.to_string()
                }
            }
        }
        "date" => {
            let title = title.ok_or_else(|| anyhow!("--title is required for date"))?;
            match client.optimal_date(&title, &upcoming).await {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, "suggestion request failed");
                    SUGGESTION_FALLBACK.to_string()
                }
            }
        }
        other => bail!("unknown action: {} (expected ideas or date)", other),
    };

    if json {
        output::print_json(&serde_json::json!({ "text": text }))?;
    } else {
        println!("{}", text);
    }
    Ok(())
}

/// Inspect or initialize the configuration file.
pub fn run_config(config: Config, action: String, path: Option<String>) -> anyhow::Result<()> {
    match action.as_str() {
        "show" => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
        "init" => {
            let target = path
                .map(|p| std::path::PathBuf::from(shellexpand::tilde(&p).as_ref()))
                .unwrap_or_else(Config::default_path);
            if target.exists() {
                bail!("refusing to overwrite existing config: {}", target.display());
            }
            config.save(&target)?;
            println!("Wrote {}", target.display());
        }
        other => bail!("unknown action: {} (expected show or init)", other),
    }
    Ok(())
}

fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date: {} (expected YYYY-MM-DD)", value))
}

fn parse_month(value: &str) -> anyhow::Result<YearMonth> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| anyhow!("invalid month: {} (expected YYYY-MM)", value))?;
    let year: i32 = year.parse().with_context(|| format!("invalid year: {}", year))?;
    let month: u32 = month.parse().with_context(|| format!("invalid month: {}", month))?;
    YearMonth::new(year, month).ok_or_else(|| anyhow!("invalid month: {} (expected 1-12)", month))
}
