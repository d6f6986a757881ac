//! Command-line interface for quizboard.

mod commands;
mod output;

pub use commands::{
    run_analytics, run_calendar, run_config, run_quizzes, run_serve, run_suggest,
};
