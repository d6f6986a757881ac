//! AI content suggestions.
//!
//! Sends aggregated quiz statistics to a generative language API and
//! returns free-text markdown. Every failure degrades to
//! [`SUGGESTION_FALLBACK`] at the call sites; the service never takes a
//! view down.

mod client;
mod prompt;

pub use client::{SuggestionClient, SUGGESTION_FALLBACK};
pub use prompt::{optimal_date_prompt, quiz_ideas_prompt};
