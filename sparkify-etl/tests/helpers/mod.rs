//! Test Helper Utilities
//!
//! Shared utilities for testing sparkify-etl

#![allow(dead_code)]

pub mod db_utils;
pub mod fixtures;
pub mod log_capture;

// Re-export commonly used items
pub use db_utils::{count_rows, create_test_db, songplay_ids};
pub use fixtures::{event_line, song_json, write_data_file, FANCY_DANCER_SONG};
pub use log_capture::{capture_logs, LogCapture};
