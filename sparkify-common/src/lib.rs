//! # Sparkify Common Library
//!
//! Shared code for the Sparkify loader:
//! - Error types
//! - Configuration loading
//! - Database session setup, schema and named statements
//! - Dimension and fact row models

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
