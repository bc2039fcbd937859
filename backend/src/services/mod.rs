//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the record store and the shared analytics core.

pub mod activity;
pub mod export;
pub mod nutrition;
pub mod report;
pub mod user;

pub use activity::ActivityService;
pub use export::ExportService;
pub use nutrition::NutritionService;
pub use report::ReportService;
pub use user::UserService;
