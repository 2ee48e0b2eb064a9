//! Account store
//!
//! In-process document store keyed by account id. Each document holds a
//! balance plus a version used for optimistic conflict detection. Single-doc
//! reads and writes go through [`AccountStore::get`] / [`AccountStore::set`];
//! cross-document consistency is available only through
//! [`AccountStore::run_transaction`].

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;

/// Attempts before a contended transaction is reported as a store failure.
const MAX_TX_ATTEMPTS: u32 = 8;

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("transaction gave up after {0} contended attempts")]
    TooMuchContention(u32),
}

#[derive(Debug, Clone, Copy)]
struct Document {
    balance: Decimal,
    version: u64,
}

/// Shared handle to the account documents.
///
/// Cheap to clone; constructed once at process start and passed to every
/// handler through router state.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    documents: Arc<RwLock<HashMap<String, Document>>>,
}

/// Consistent view of the documents named by a transaction, taken before the
/// transaction body runs. Versions stay internal; callers only see balances.
#[derive(Debug)]
pub struct TxSnapshot {
    entries: HashMap<String, Option<(Decimal, u64)>>,
}

impl TxSnapshot {
    /// Balance of `id` at snapshot time, `None` if the document is absent.
    pub fn balance(&self, id: &str) -> Option<Decimal> {
        self.entries.get(id).copied().flatten().map(|(b, _)| b)
    }
}

/// Decision returned by a transaction body.
///
/// `Abort` is for business outcomes decided against the snapshot (nothing is
/// written, the value is handed back as-is); infrastructure failures are the
/// store's own `Err` channel.
pub enum TxOutcome<T> {
    Commit {
        writes: Vec<(String, Decimal)>,
        value: T,
    },
    Abort(T),
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-document read.
    pub async fn get(&self, id: &str) -> Option<Decimal> {
        self.documents.read().await.get(id).map(|doc| doc.balance)
    }

    /// Single-document create-or-overwrite.
    pub async fn set(&self, id: &str, balance: Decimal) {
        let mut docs = self.documents.write().await;
        let version = docs.get(id).map(|doc| doc.version + 1).unwrap_or(1);
        docs.insert(id.to_string(), Document { balance, version });
    }

    /// Remove every document. Returns how many were deleted.
    pub async fn delete_all(&self) -> usize {
        let mut docs = self.documents.write().await;
        let removed = docs.len();
        docs.clear();
        removed
    }

    /// Atomic multi-document read-modify-write.
    ///
    /// Snapshots `keys`, runs `body` against the snapshot, then commits its
    /// writes only if none of the snapshotted documents changed in the
    /// meantime. On conflict the snapshot is retaken and `body` re-run, up to
    /// [`MAX_TX_ATTEMPTS`] times. The body must be pure with respect to the
    /// snapshot: it may run more than once.
    pub async fn run_transaction<T, F>(&self, keys: &[&str], body: F) -> Result<T, StoreError>
    where
        F: Fn(&TxSnapshot) -> TxOutcome<T>,
    {
        for attempt in 1..=MAX_TX_ATTEMPTS {
            let snapshot = self.snapshot(keys).await;

            match body(&snapshot) {
                TxOutcome::Abort(value) => return Ok(value),
                TxOutcome::Commit { writes, value } => {
                    let mut docs = self.documents.write().await;
                    if Self::conflicts(&docs, &snapshot) {
                        drop(docs);
                        tracing::debug!(attempt, "transaction conflict, retrying");
                        continue;
                    }
                    for (id, balance) in writes {
                        let version = docs.get(&id).map(|doc| doc.version + 1).unwrap_or(1);
                        docs.insert(id, Document { balance, version });
                    }
                    return Ok(value);
                }
            }
        }

        Err(StoreError::TooMuchContention(MAX_TX_ATTEMPTS))
    }

    async fn snapshot(&self, keys: &[&str]) -> TxSnapshot {
        let docs = self.documents.read().await;
        let entries = keys
            .iter()
            .map(|&key| {
                let seen = docs.get(key).map(|doc| (doc.balance, doc.version));
                (key.to_string(), seen)
            })
            .collect();
        TxSnapshot { entries }
    }

    /// A snapshotted document conflicts if its version changed, it was
    /// deleted, or it sprang into existence since the snapshot.
    fn conflicts(docs: &HashMap<String, Document>, snapshot: &TxSnapshot) -> bool {
        snapshot.entries.iter().any(|(key, seen)| {
            let current = docs.get(key).map(|doc| doc.version);
            let snapshotted = seen.map(|(_, version)| version);
            current != snapshotted
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn get_missing_is_none() {
        let store = AccountStore::new();
        assert_eq!(store.get("nobody").await, None);
    }

    #[tokio::test]
    async fn set_then_get() {
        let store = AccountStore::new();
        store.set("alice", dec!(100)).await;
        assert_eq!(store.get("alice").await, Some(dec!(100)));

        store.set("alice", dec!(60)).await;
        assert_eq!(store.get("alice").await, Some(dec!(60)));
    }

    #[tokio::test]
    async fn delete_all_empties_the_store() {
        let store = AccountStore::new();
        store.set("a", dec!(1)).await;
        store.set("b", dec!(2)).await;

        assert_eq!(store.delete_all().await, 2);
        assert_eq!(store.get("a").await, None);
        assert_eq!(store.get("b").await, None);
        assert_eq!(store.delete_all().await, 0);
    }

    #[tokio::test]
    async fn transaction_commits_all_writes() {
        let store = AccountStore::new();
        store.set("a", dec!(50)).await;

        let committed = store
            .run_transaction(&["a", "b"], |snap| {
                let a = snap.balance("a").unwrap();
                let b = snap.balance("b").unwrap_or(Decimal::ZERO);
                TxOutcome::Commit {
                    writes: vec![("a".to_string(), a - dec!(20)), ("b".to_string(), b + dec!(20))],
                    value: true,
                }
            })
            .await
            .unwrap();

        assert!(committed);
        assert_eq!(store.get("a").await, Some(dec!(30)));
        assert_eq!(store.get("b").await, Some(dec!(20)));
    }

    #[tokio::test]
    async fn abort_leaves_documents_untouched() {
        let store = AccountStore::new();
        store.set("a", dec!(50)).await;

        let outcome: &str = store
            .run_transaction(&["a"], |_| TxOutcome::Abort("nope"))
            .await
            .unwrap();

        assert_eq!(outcome, "nope");
        assert_eq!(store.get("a").await, Some(dec!(50)));
    }

    #[tokio::test]
    async fn concurrent_increments_do_not_lose_updates() {
        let store = AccountStore::new();
        store.set("counter", Decimal::ZERO).await;

        let mut tasks = Vec::new();
        for _ in 0..2 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                for _ in 0..50 {
                    store
                        .run_transaction(&["counter"], |snap| {
                            let current = snap.balance("counter").unwrap();
                            TxOutcome::Commit {
                                writes: vec![("counter".to_string(), current + dec!(1))],
                                value: (),
                            }
                        })
                        .await
                        .unwrap();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.get("counter").await, Some(dec!(100)));
    }
}
