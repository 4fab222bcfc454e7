//! studyplan-core: subject registry, allocation engine, and persistence.
//!
//! This crate holds the study planner's data model, the weighted allocation
//! and adaptive rebalancing logic, CSV plan files, and configuration.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod persistence;
pub mod planner;

pub use engine::AdaptiveParams;
pub use error::PlannerError;
pub use model::{Schedule, Subject};
pub use planner::StudyPlanner;
