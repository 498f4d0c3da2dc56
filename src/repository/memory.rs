//! In-memory account repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{AccountRepository, RepositoryError};
use crate::models::account::{Account, NewAccount};

#[derive(Default)]
struct Store {
    accounts: BTreeMap<i32, Account>,
    last_id: i32,
}

impl Store {
    /// Whether an account other than `except` already uses `number`.
    fn number_taken(&self, number: i64, except: Option<i32>) -> bool {
        self.accounts
            .values()
            .any(|account| account.number == number && Some(account.id) != except)
    }
}

/// Process-local account store with the same contract as the `accounts`
/// table: serial ids, unique `number`, database-managed timestamps.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    store: RwLock<Store>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn number_violation() -> RepositoryError {
    RepositoryError::UniqueViolation {
        field: "number".to_string(),
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_all(&self) -> Result<Vec<Account>, RepositoryError> {
        Ok(self.store.read().await.accounts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, RepositoryError> {
        Ok(self.store.read().await.accounts.get(&id).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let mut store = self.store.write().await;
        if store.number_taken(account.number, None) {
            return Err(number_violation());
        }

        store.last_id += 1;
        let now = Utc::now();
        let account = Account {
            id: store.last_id,
            number: account.number,
            ag: account.ag,
            balance: account.balance,
            account_type: account.account_type,
            created_at: now,
            updated_at: now,
        };
        store.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn update(&self, id: i32, account: &Account) -> Result<Account, RepositoryError> {
        let mut store = self.store.write().await;
        if store.number_taken(account.number, Some(id)) {
            return Err(number_violation());
        }

        let stored = store
            .accounts
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        stored.number = account.number;
        stored.ag = account.ag.clone();
        stored.balance = account.balance;
        stored.account_type = account.account_type;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        Ok(self.store.write().await.accounts.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
