// src/transaction.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Direction of a wallet event.
///
/// Serialized as `"earn"` / `"spend"` under the `type` field of the
/// persisted record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earn,
    Spend,
}

impl TransactionKind {
    pub fn is_earn(&self) -> bool {
        matches!(self, TransactionKind::Earn)
    }

    pub fn is_spend(&self) -> bool {
        matches!(self, TransactionKind::Spend)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Earn => "earn",
            TransactionKind::Spend => "spend",
        }
    }
}

/// A single earn or spend event in a wallet's history.
///
/// Invariants:
/// - id and amount are immutable after creation
/// - amount is non-negative (positive at every construction site)
/// - entries are never edited or removed once appended to an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Unique identifier. Ulids are timestamp-ordered with a random
    /// suffix, which gives collision resistance within a session without
    /// any coordination.
    pub id: Ulid,

    /// Magnitude of the event.
    pub amount: i64,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Free-text label shown in history views.
    pub description: String,

    /// Creation time, client clock.
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(amount: i64, kind: TransactionKind, description: String) -> Self {
        Self {
            id: Ulid::new(),
            amount,
            kind,
            description,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        assert!(TransactionKind::Earn.is_earn());
        assert!(!TransactionKind::Earn.is_spend());
        assert!(TransactionKind::Spend.is_spend());
        assert!(!TransactionKind::Spend.is_earn());
    }

    #[test]
    fn test_serialized_record_shape() {
        let tx = Transaction::new(50, TransactionKind::Spend, "bought hint".to_string());
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["type"], "spend");
        assert_eq!(json["amount"], 50);
        assert_eq!(json["description"], "bought hint");
        // Ulid and timestamp serialize as strings
        assert!(json["id"].is_string());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = Transaction::new(1, TransactionKind::Earn, "a".to_string());
        let b = Transaction::new(1, TransactionKind::Earn, "b".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let tx = Transaction::new(30, TransactionKind::Earn, "quiz reward".to_string());
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
