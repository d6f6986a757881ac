//! Quiz records and collection management.

mod colors;
mod manager;
mod types;

pub use colors::{color_for_theme, NEUTRAL_THEME_COLOR, THEME_COLORS};
pub use manager::QuizManager;
pub use types::{NewQuiz, QuizRecord, QuizUpdate};
