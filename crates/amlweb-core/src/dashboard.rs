//! Dashboard view state and lifecycle
//!
//! A [`Dashboard`] is mounted once, issues exactly one fetch for that
//! mount, and is rendered any number of times from [`Dashboard::snapshot`].
//! Unmounting (explicitly or by dropping) aborts the pending fetch, and the
//! disposed flag lives under the same lock the fetch writes through, so a
//! result that races with disposal is discarded.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::error::FetchError;
use crate::models::Transaction;
use crate::source::TransactionSource;

/// Load status of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Not mounted yet
    #[default]
    Idle,
    /// Mounted, fetch in flight
    Loading,
    /// Fetch succeeded
    Loaded,
    /// Fetch failed; the held list is whatever it was before
    Failed(FetchError),
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Loaded => "loaded",
            LoadStatus::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable copy of the view state for rendering
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub status: LoadStatus,
    pub transactions: Vec<Transaction>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// First transaction carrying `id`
    pub fn find(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            LoadStatus::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Mutable render state owned by one dashboard instance
#[derive(Debug, Default)]
pub struct DashboardState {
    status: LoadStatus,
    transactions: Vec<Transaction>,
    loaded_at: Option<DateTime<Utc>>,
    disposed: bool,
}

impl DashboardState {
    /// Apply a fetch outcome; returns `false` if the view was already disposed
    pub fn apply(&mut self, outcome: Result<Vec<Transaction>, FetchError>) -> bool {
        if self.disposed {
            return false;
        }
        match outcome {
            Ok(transactions) => {
                self.transactions = transactions;
                self.status = LoadStatus::Loaded;
                self.loaded_at = Some(Utc::now());
            }
            Err(error) => {
                self.status = LoadStatus::Failed(error);
            }
        }
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            status: self.status.clone(),
            transactions: self.transactions.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

fn write_state(state: &RwLock<DashboardState>) -> RwLockWriteGuard<'_, DashboardState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// The transactions dashboard view
#[derive(Debug, Default)]
pub struct Dashboard {
    state: Arc<RwLock<DashboardState>>,
    task: Option<JoinHandle<()>>,
    mounted: bool,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the view and start its single fetch.
    ///
    /// Must be called within a tokio runtime. Returns `false` without
    /// issuing a request if this instance was already mounted.
    pub fn mount(&mut self, source: Arc<dyn TransactionSource>) -> bool {
        if self.mounted {
            log::debug!("Dashboard already mounted, not fetching again");
            return false;
        }
        self.mounted = true;
        write_state(&self.state).status = LoadStatus::Loading;

        let state = Arc::clone(&self.state);
        log::info!("Mounting dashboard, fetching transactions from {}", source.describe());
        self.task = Some(tokio::spawn(async move {
            let outcome = source.fetch_transactions().await;
            match &outcome {
                Ok(transactions) => {
                    log::info!("Loaded {} transactions from {}", transactions.len(), source.describe())
                }
                Err(error) => log::error!("Error fetching transactions from {}: {}", source.describe(), error),
            }
            if !write_state(&state).apply(outcome) {
                log::debug!("Dashboard disposed before fetch completed, result discarded");
            }
        }));
        true
    }

    /// Wait for the pending fetch, if any, to finish
    pub async fn settle(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    log::error!("Dashboard fetch task failed: {}", e);
                }
            }
        }
    }

    /// Abort any pending fetch and dispose of the state
    pub fn unmount(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        let mut state = write_state(&self.state);
        if self.mounted && !state.disposed {
            log::debug!("Dashboard unmounted");
        }
        state.disposed = true;
    }

    #[cfg(test)]
    fn is_disposed(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).is_disposed()
    }

    /// Current state for rendering; never triggers a fetch
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state.read().unwrap_or_else(PoisonError::into_inner).snapshot()
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.unmount();
    }
}
