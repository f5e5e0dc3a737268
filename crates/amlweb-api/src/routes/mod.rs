//! Route handlers organized by feature
//!
//! - dashboard: Transactions dashboard page, JSON list/detail, remount
//! - reports: SAR report downloads
//! - settings: Configuration display

pub mod dashboard;
pub mod reports;
pub mod settings;
