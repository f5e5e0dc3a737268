//! Dashboard routes - Transactions table and JSON endpoints
//!
//! Page routes:
//! - /, /dashboard: Transactions dashboard page
//!
//! API routes:
//! - /api/transactions: Current dashboard state (JSON)
//! - /api/transactions/:id: Single transaction (JSON)
//! - /api/dashboard/remount: Remount the dashboard (POST)

pub mod api;
pub mod page;

pub use api::{api_remount, api_transaction_detail, api_transactions, TransactionsResponse};
pub use page::{page_dashboard, render_dashboard};
