//! Strive Hive Shared Library
//!
//! The analytics core: body metrics, aggregation, health score,
//! recommendations, trend analysis and report assembly. Everything here is
//! pure and works on read-only slices of records.

pub mod aggregation;
pub mod errors;
pub mod health_metrics;
pub mod health_score;
pub mod models;
pub mod recommendations;
pub mod report;
pub mod rounding;
pub mod trends;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use models::*;
pub use report::{DateRange, Period, Report, ReportAssembler};
pub use trends::FitnessTrends;
pub use types::*;
