// src/lib.rs
pub mod account;
pub mod adapters;
pub mod error;
pub mod session;
pub mod store;
pub mod transaction;

pub use account::{INITIAL_EARNED, WalletAccount};
pub use error::WalletError;
pub use session::WalletSession;
pub use store::{WalletStore, WalletSummary};
pub use transaction::{Transaction, TransactionKind};

use async_trait::async_trait;

/// Durable per-key string storage surviving process restarts.
///
/// Implementors MUST:
/// 1. Treat keys as opaque — no interpretation beyond exact match and
///    prefix match
/// 2. Overwrite the whole value on `set` (snapshot semantics, never a
///    partial update)
/// 3. Report exhausted capacity as `QuotaExceeded` so callers can surface
///    a storage-full notice
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, WalletError>;
    async fn set(&self, key: &str, value: String) -> Result<(), WalletError>;
    async fn remove_prefix(&self, prefix: &str) -> Result<(), WalletError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryKv;

    #[tokio::test]
    async fn test_kv_contract_on_memory_backend() {
        let kv = MemoryKv::new();

        assert_eq!(kv.get("missing").await.unwrap(), None);

        kv.set("wallet_u1", "one".to_string()).await.unwrap();
        kv.set("wallet_u1", "two".to_string()).await.unwrap();
        assert_eq!(kv.get("wallet_u1").await.unwrap(), Some("two".to_string()));

        kv.remove_prefix("wallet_").await.unwrap();
        assert_eq!(kv.get("wallet_u1").await.unwrap(), None);
    }
}
