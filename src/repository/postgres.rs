//! PostgreSQL account repository.

use async_trait::async_trait;

use super::{AccountRepository, RepositoryError};
use crate::{
    db::DbPool,
    models::account::{Account, NewAccount},
};

/// Columns selected for every `Account` row.
const ACCOUNT_COLUMNS: &str = "id, number, ag, balance, type, created_at, updated_at";

/// Account repository backed by the `accounts` table.
///
/// Cloning is cheap: the pool is reference counted.
#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: DbPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                RepositoryError::UniqueViolation {
                    field: db_error
                        .constraint()
                        .map(constraint_field)
                        .unwrap_or("unknown")
                        .to_string(),
                }
            }
            _ => RepositoryError::Other {
                message: error.to_string(),
            },
        }
    }
}

/// Column name of a single-column unique constraint named the PostgreSQL
/// default way: `accounts_<column>_key`.
fn constraint_field(constraint: &str) -> &str {
    constraint
        .strip_prefix("accounts_")
        .and_then(|rest| rest.strip_suffix("_key"))
        .unwrap_or(constraint)
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_all(&self) -> Result<Vec<Account>, RepositoryError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (number, ag, balance, type)
            VALUES ($1, $2, $3, $4)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.number)
        .bind(account.ag)
        .bind(account.balance)
        .bind(account.account_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    // Plain overwrite, no row lock: concurrent read-modify-write cycles on
    // the same account can lose updates.
    async fn update(&self, id: i32, account: &Account) -> Result<Account, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET number = $1,
                ag = $2,
                balance = $3,
                type = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.number)
        .bind(&account.ag)
        .bind(account.balance)
        .bind(account.account_type)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(account)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
