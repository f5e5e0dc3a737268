//! Report routes - Suspicious activity report downloads

pub mod api;

pub use api::api_transaction_report;
