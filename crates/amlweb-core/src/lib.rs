//! Core transaction handling for amlweb
//!
//! - [`models`]: typed transaction record decoded from the positional wire format
//! - [`source`]: the data source seam and its HTTP implementation
//! - [`dashboard`]: the dashboard view and its mount/unmount lifecycle
//! - [`report`]: suspicious activity report rendering

pub mod dashboard;
pub mod error;
pub mod models;
pub mod report;
pub mod source;

pub use dashboard::{Dashboard, DashboardSnapshot, DashboardState, LoadStatus};
pub use error::{DecodeError, ErrorCode, ErrorDetails, FetchError};
pub use models::{decode_transactions, Transaction, MIN_RECORD_FIELDS};
pub use report::SarReport;
pub use source::{HttpTransactionSource, TransactionSource};
