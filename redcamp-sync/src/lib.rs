//! # redcamp-sync
//!
//! Reconciliation of Redmine projects with TimeCamp tasks.
//!
//! [`plan::plan`] computes what to do; [`pipeline::run`] fetches both sides
//! through the [`ports`] traits and applies the plan.

pub mod error;
pub mod pipeline;
pub mod plan;
pub mod ports;
pub mod report;

pub use error::SyncError;
pub use plan::{PlannedStep, SyncPlan};
pub use ports::{ProjectSource, TaskTarget};
pub use report::{SyncAction, SyncReport};
