//! sparkify-etl library interface
//!
//! Loads song metadata and user activity logs into the Sparkify star
//! schema. Exposes the pipeline and its parts for integration testing.

pub mod db;
pub mod models;
pub mod pipeline;
pub mod services;

pub use pipeline::{run_pipeline, run_with_pool, PipelineReport};
