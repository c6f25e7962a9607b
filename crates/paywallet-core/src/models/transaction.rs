use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum TransactionKind {
    Sent,
    Received,
}

impl TransactionKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sent" => Some(TransactionKind::Sent),
            "received" => Some(TransactionKind::Received),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Sent => write!(f, "Sent"),
            TransactionKind::Received => write!(f, "Received"),
        }
    }
}

/// The backend sends amounts either as JSON numbers or numeric strings.
/// Anything else decodes as `Other` and has no value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAmount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl WireAmount {
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            WireAmount::Number(n) => *n,
            WireAmount::Text(s) => s.trim().parse::<f64>().ok()?,
            WireAmount::Other(_) => return None,
        };
        v.is_finite().then_some(v)
    }
}

/// Transaction item as returned by the notifications endpoint.
///
/// Every field is optional on the wire so that one malformed item cannot
/// fail the whole listing; `normalize` decides what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiTransaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<WireAmount>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "senderName", default)]
    pub sender_name: Option<String>,
    #[serde(rename = "receiverName", default)]
    pub receiver_name: Option<String>,
}

/// Normalised transaction used by the views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: f64,
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub date: DateTime<Utc>,
    pub description: String,
    /// `HH:MM`, UTC
    pub time: String,
    pub sender_name: Option<String>,
    pub receiver_name: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ApiTransaction {
    fn default_description(&self, kind: TransactionKind) -> String {
        let sender = non_empty(&self.sender_name);
        let receiver = non_empty(&self.receiver_name);
        match kind {
            TransactionKind::Sent => format!(
                "Sent {}to {}",
                sender.map(|s| format!("from {} ", s)).unwrap_or_default(),
                receiver.unwrap_or("Unknown")
            ),
            TransactionKind::Received => format!(
                "Received {}from {}",
                receiver.map(|r| format!("by {} ", r)).unwrap_or_default(),
                sender.unwrap_or("Unknown")
            ),
        }
    }

    /// Convert to a display transaction. `index` seeds the synthetic id used
    /// when the backend omits one. Items with an unknown type, or a missing
    /// or unparseable amount or date, are dropped.
    pub fn normalize(&self, index: usize) -> Option<Transaction> {
        let Some(kind) = self.kind.as_deref().and_then(TransactionKind::parse) else {
            warn!(index, kind = ?self.kind, "Dropping transaction with unknown type");
            return None;
        };
        let Some(amount) = self.amount.as_ref().and_then(WireAmount::value) else {
            warn!(index, "Dropping transaction with non-numeric amount");
            return None;
        };
        let Some(raw_date) = self.date.as_deref() else {
            warn!(index, "Dropping transaction without a date");
            return None;
        };
        let date = match DateTime::parse_from_rfc3339(raw_date) {
            Ok(d) => d.with_timezone(&Utc),
            Err(e) => {
                warn!(index, error = %e, "Dropping transaction with invalid date");
                return None;
            }
        };

        let description = match non_empty(&self.description) {
            Some(d) => d.to_string(),
            None => self.default_description(kind),
        };

        Some(Transaction {
            id: non_empty(&self.id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("tx-{}", index)),
            kind,
            amount,
            date,
            description,
            time: date.format("%H:%M").to_string(),
            sender_name: self.sender_name.clone(),
            receiver_name: self.receiver_name.clone(),
        })
    }
}

/// Normalise a whole listing, dropping malformed items.
pub fn normalize_all(items: &[ApiTransaction]) -> Vec<Transaction> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| item.normalize(i))
        .collect()
}
