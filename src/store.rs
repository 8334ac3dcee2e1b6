// src/store.rs
use crate::KvStore;
use crate::account::WalletAccount;
use crate::error::WalletError;
use crate::session::WalletSession;
use crate::transaction::{Transaction, TransactionKind};
use metrics::{counter, histogram};
use std::sync::Arc;
use tracing::{debug, warn};

/// Key prefix of the live snapshot scheme: one key per identity.
pub const STORAGE_PREFIX: &str = "wallet_";

/// Pre-1.0 snapshots lived under this prefix. Purged once at startup,
/// never written.
pub const LEGACY_PREFIX: &str = "educoins_";

/// Storage key for an identity's snapshot. All reads and writes go
/// through this derivation, so two identities can never share a key.
pub fn storage_key(user_id: &str) -> String {
    format!("{STORAGE_PREFIX}{user_id}")
}

/// Read view handed to UI consumers: the account totals plus the balance
/// derived at the moment of the call.
#[derive(Debug, Clone)]
pub struct WalletSummary {
    pub earned: i64,
    pub spent: i64,
    pub balance: i64,
    pub transactions: Vec<Transaction>,
}

/// Owns the authoritative in-memory account for the current identity and
/// keeps the persisted copy synchronized.
///
/// The persistence port is injected at construction; identity changes
/// arrive through `set_identity`. Every state-changing operation writes
/// the full account snapshot back to storage — a full overwrite, not an
/// incremental append, which is fine at the expected history sizes.
pub struct WalletStore {
    kv: Arc<dyn KvStore>,
    session: WalletSession,
    account: WalletAccount,
}

impl WalletStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            session: WalletSession::NoIdentity,
            account: WalletAccount::empty(),
        }
    }

    /// One-time startup cleanup: drop every snapshot persisted under the
    /// legacy key scheme. Not part of steady-state operation.
    pub async fn purge_legacy_snapshots(&self) -> Result<(), WalletError> {
        self.kv.remove_prefix(LEGACY_PREFIX).await
    }

    /// Notification entry point for identity changes.
    ///
    /// `None` deactivates the wallet. A new identity resets to a freshly
    /// granted provisional account first, then consults the persisted
    /// snapshot: a well-formed snapshot replaces the provisional value, a
    /// missing one leaves it standing, and a malformed one is logged and
    /// discarded. The resolved account is written back before returning.
    /// Re-announcing the current identity changes nothing.
    pub async fn set_identity(&mut self, user_id: Option<&str>) -> Result<(), WalletError> {
        let Some(user) = user_id else {
            self.session = WalletSession::NoIdentity;
            self.account = WalletAccount::empty();
            return Ok(());
        };

        if self.session.user_id() == Some(user) {
            return Ok(());
        }

        let next = WalletSession::Loading(user.to_string());
        debug_assert!(self.session.can_transition_to(&next));
        self.session = next;
        self.account = WalletAccount::new();

        match self.load(user).await {
            Ok(Some(account)) => self.account = account,
            Ok(None) => {}
            Err(e) => warn!(user = %user, error = %e, "discarding unreadable wallet snapshot"),
        }

        let next = WalletSession::Ready(user.to_string());
        debug_assert!(self.session.can_transition_to(&next));
        self.session = next;

        self.persist().await
    }

    /// Append a transaction to the current identity's history and persist
    /// the updated snapshot. Spend transactions increase the spent total;
    /// earn transactions only extend the history.
    ///
    /// Without a current identity this is a no-op, whatever the input.
    /// Otherwise non-positive amounts are rejected.
    pub async fn record_transaction(
        &mut self,
        amount: i64,
        kind: TransactionKind,
        description: impl Into<String>,
    ) -> Result<(), WalletError> {
        if !self.session.has_identity() {
            return Ok(());
        }
        if amount <= 0 {
            return Err(WalletError::InvalidAmount);
        }

        histogram!("wallet.transaction.amount", "kind" => kind.as_str()).record(amount as f64);

        self.account
            .record(Transaction::new(amount, kind, description.into()));

        let result = self.persist().await;

        counter!("wallet.transactions.total",
            "kind" => kind.as_str(),
            "status" => if result.is_ok() { "success" } else { "failed" }
        )
        .increment(1);

        result
    }

    /// Raw increment of the spent total, persisted immediately. Prefer
    /// `record_transaction`, which keeps the history in step; this exists
    /// for consumers that track their own history.
    pub async fn update_spent(&mut self, amount: i64) -> Result<(), WalletError> {
        if !self.session.has_identity() {
            return Ok(());
        }
        if amount <= 0 {
            return Err(WalletError::InvalidAmount);
        }

        self.account.spent += amount;
        self.persist().await
    }

    /// Re-read the persisted snapshot for the current identity and adopt
    /// it. Missing or malformed data is logged and ignored, leaving the
    /// in-memory account untouched. No-op without an identity.
    pub async fn refresh(&mut self) {
        let Some(user) = self.session.user_id().map(str::to_owned) else {
            return;
        };

        match self.load(&user).await {
            Ok(Some(account)) => self.account = account,
            Ok(None) => debug!(user = %user, "no persisted wallet snapshot to refresh from"),
            Err(e) => warn!(user = %user, error = %e, "keeping in-memory wallet, refresh failed"),
        }
    }

    pub fn earned(&self) -> i64 {
        self.account.earned
    }

    pub fn spent(&self) -> i64 {
        self.account.spent
    }

    pub fn balance(&self) -> i64 {
        self.account.balance()
    }

    /// Event history, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.account.transactions
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn summary(&self) -> WalletSummary {
        WalletSummary {
            earned: self.account.earned,
            spent: self.account.spent,
            balance: self.account.balance(),
            transactions: self.account.transactions.clone(),
        }
    }

    async fn load(&self, user: &str) -> Result<Option<WalletAccount>, WalletError> {
        let Some(raw) = self.kv.get(&storage_key(user)).await? else {
            return Ok(None);
        };

        let account =
            serde_json::from_str(&raw).map_err(|e| WalletError::Corrupt(e.to_string()))?;
        Ok(Some(account))
    }

    async fn persist(&self) -> Result<(), WalletError> {
        let Some(user) = self.session.user_id() else {
            return Ok(());
        };

        let blob = serde_json::to_string(&self.account)
            .map_err(|e| WalletError::Storage(e.to_string()))?;
        self.kv.set(&storage_key(user), blob).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_is_scoped_by_identity() {
        assert_eq!(storage_key("u1"), "wallet_u1");
        assert_ne!(storage_key("u1"), storage_key("u2"));
    }

    #[test]
    fn test_legacy_prefix_is_disjoint_from_live_scheme() {
        assert!(!storage_key("u1").starts_with(LEGACY_PREFIX));
    }
}
