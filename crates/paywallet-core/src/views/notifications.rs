//! Notification feed built from the transaction history.

use serde::Serialize;
use tracing::warn;

use crate::api::ApiClient;
use crate::models::{normalize_all, Transaction, TransactionKind};
use crate::utils::{format_currency, format_date_long, format_date_short};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Notification {
    pub id: String,
    pub kind: TransactionKind,
    /// `Alice sent you $50.00` / `You sent $25.50 to Bob`
    pub headline: String,
    pub amount: String,
    pub date_short: String,
}

/// Detail panel for a single notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct NotificationDetail {
    pub id: String,
    pub title: String,
    pub sender_name: String,
    pub receiver_name: String,
    pub amount: String,
    pub date: String,
}

fn party(name: &Option<String>, fallback: &str) -> String {
    name.as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

impl From<&Transaction> for Notification {
    fn from(t: &Transaction) -> Self {
        let amount = format_currency(t.amount);
        let headline = match t.kind {
            TransactionKind::Received => {
                format!("{} sent you {}", party(&t.sender_name, "Someone"), amount)
            }
            TransactionKind::Sent => {
                format!("You sent {} to {}", amount, party(&t.receiver_name, "Unknown"))
            }
        };
        Self {
            id: t.id.clone(),
            kind: t.kind,
            headline,
            amount,
            date_short: format_date_short(&t.date),
        }
    }
}

impl From<&Transaction> for NotificationDetail {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            title: match t.kind {
                TransactionKind::Sent => "Sent Payment",
                TransactionKind::Received => "Received Payment",
            }
            .to_string(),
            sender_name: party(&t.sender_name, "You"),
            receiver_name: party(&t.receiver_name, "You"),
            amount: format_currency(t.amount),
            date: format_date_long(&t.date),
        }
    }
}

/// Newest-first feed with an optional selected entry.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    transactions: Vec<Transaction>,
}

impl NotificationFeed {
    pub fn new(mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Self { transactions }
    }

    pub fn items(&self) -> Vec<Notification> {
        self.transactions.iter().map(Notification::from).collect()
    }

    pub fn detail(&self, id: &str) -> Option<NotificationDetail> {
        self.transactions
            .iter()
            .find(|t| t.id == id)
            .map(NotificationDetail::from)
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Fetch the feed; a failed fetch renders as an empty feed.
    pub async fn load(api: &ApiClient) -> Self {
        match api.fetch_notifications().await {
            Ok(items) => Self::new(normalize_all(&items)),
            Err(e) => {
                warn!(error = %e, "Failed to load notifications");
                Self::default()
            }
        }
    }
}
