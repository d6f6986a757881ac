//! Integration tests for quizboard.
//!
//! These tests exercise the calendar aggregation and the quiz manager over
//! the in-process store backend; nothing here touches the network.

#[path = "integration/test_grid.rs"]
mod test_grid;

#[path = "integration/test_manager.rs"]
mod test_manager;
