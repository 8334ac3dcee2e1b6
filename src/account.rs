// src/account.rs
use crate::transaction::{Transaction, TransactionKind};
use serde::{Deserialize, Serialize};

/// Coins granted to every wallet the first time its identity becomes
/// active. Set once per account lifecycle, immutable thereafter.
pub const INITIAL_EARNED: i64 = 1200;

fn initial_earned() -> i64 {
    INITIAL_EARNED
}

/// Active accounts are always granted; a zeroed or negative stored value
/// means the snapshot predates the grant and reads back as the grant.
fn earned_or_grant<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let earned = i64::deserialize(deserializer)?;
    Ok(if earned <= 0 { INITIAL_EARNED } else { earned })
}

/// A user's wallet state: earned/spent totals plus the full event history.
///
/// This struct is the persisted record: serializing it yields the
/// `{ earned, spent, transactions }` snapshot blob. The balance is never a
/// field — it is derived from `earned - spent` on every read so the two
/// can never drift apart.
///
/// Invariants:
/// - earned is fixed at creation
/// - spent equals the sum of amounts over all Spend transactions
/// - transactions is append-only, newest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletAccount {
    #[serde(default = "initial_earned", deserialize_with = "earned_or_grant")]
    pub earned: i64,

    #[serde(default)]
    pub spent: i64,

    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl WalletAccount {
    /// A freshly granted account, the provisional value for any identity
    /// that has just become current.
    pub fn new() -> Self {
        Self {
            earned: INITIAL_EARNED,
            spent: 0,
            transactions: Vec::new(),
        }
    }

    /// The account shown when no identity is current. Nothing to earn,
    /// nothing to spend.
    pub fn empty() -> Self {
        Self {
            earned: 0,
            spent: 0,
            transactions: Vec::new(),
        }
    }

    pub fn balance(&self) -> i64 {
        self.earned - self.spent
    }

    /// Append a transaction, newest first. Spend events increase the
    /// spent total; earn events leave the totals untouched (the earned
    /// grant is fixed).
    pub fn record(&mut self, tx: Transaction) {
        if tx.kind.is_spend() {
            self.spent += tx.amount;
        }
        self.transactions.insert(0, tx);
    }

    /// Recompute the spent total from the history. Agrees with `spent`
    /// for any account mutated only through `record`.
    pub fn spent_from_history(&self) -> i64 {
        self.transactions
            .iter()
            .filter(|tx| tx.kind.is_spend())
            .map(|tx| tx.amount)
            .sum()
    }
}
