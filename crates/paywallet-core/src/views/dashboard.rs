//! Dashboard aggregates: balance plus sent/received series.

use serde::Serialize;
use tracing::warn;

use crate::api::ApiClient;
use crate::models::{normalize_all, Transaction, TransactionKind};

/// One sent or received series, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Series {
    pub points: Vec<Transaction>,
    pub total: f64,
}

impl Series {
    fn from_points(points: Vec<Transaction>) -> Self {
        let total = points.iter().map(|t| t.amount).sum();
        Self { points, total }
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct DashboardSummary {
    pub balance: f64,
    pub transactions: Vec<Transaction>,
    pub sent: Series,
    pub received: Series,
}

impl DashboardSummary {
    pub fn new(balance: f64, mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by_key(|t| t.date);

        let (sent, received): (Vec<_>, Vec<_>) = transactions
            .iter()
            .cloned()
            .partition(|t| t.kind == TransactionKind::Sent);

        Self {
            balance,
            transactions,
            sent: Series::from_points(sent),
            received: Series::from_points(received),
        }
    }

    /// Received minus sent over the listed transactions
    pub fn net_flow(&self) -> f64 {
        self.received.total - self.sent.total
    }

    pub fn has_transactions(&self) -> bool {
        !self.transactions.is_empty()
    }

    /// Fetch history and balance concurrently. Any failure degrades to an
    /// empty dashboard with a zero balance.
    pub async fn load(api: &ApiClient) -> Self {
        let (history, balance) = tokio::join!(api.fetch_notifications(), api.fetch_total_balance());

        match (history, balance) {
            (Ok(items), Ok(balance)) => Self::new(balance, normalize_all(&items)),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Failed to load dashboard data");
                Self::default()
            }
        }
    }
}
