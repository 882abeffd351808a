//! Read models for query output
//!
//! View structs assembled from several domain entities for display.

pub mod dashboard;
pub mod report;

pub use dashboard::DashboardSummary;
pub use report::Report;
