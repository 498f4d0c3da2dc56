//! Account persistence.
//!
//! The service talks to storage only through [`AccountRepository`]. Two
//! implementations exist:
//! - [`postgres::PostgresAccountRepository`]: the `accounts` table via sqlx
//! - [`memory::InMemoryAccountRepository`]: a process-local store used when
//!   no database is configured, and by tests
//!
//! Each implementation classifies its own failures into [`RepositoryError`]
//! so callers match on a closed set of variants.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::account::{Account, NewAccount};

/// Classified persistence failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    /// The row addressed by an update does not exist.
    #[error("Record not found")]
    NotFound,

    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint failed on the field: {field}")]
    UniqueViolation { field: String },

    /// Anything else the gateway reported.
    #[error("{message}")]
    Other { message: String },
}

/// Storage operations for accounts.
///
/// No validation happens here; callers pass already-validated data.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// All accounts, ordered by id.
    async fn find_all(&self) -> Result<Vec<Account>, RepositoryError>;

    /// `None` when no account has this id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, RepositoryError>;

    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError>;

    /// Replace every mutable field of account `id` with the values in `account`.
    ///
    /// `id` and `created_at` of the argument are ignored; `updated_at` is
    /// refreshed.
    async fn update(&self, id: i32, account: &Account) -> Result<Account, RepositoryError>;

    /// Whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;

    /// Check that the underlying store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
