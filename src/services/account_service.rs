//! Account service - business rules for bank accounts.
//!
//! This service handles:
//! - Request validation
//! - Balance checks for withdrawals
//! - Translating repository failures into API errors
//!
//! # Error Policy
//!
//! A missing account is always reported as `NotFound`. Any other repository
//! failure becomes `BadRequest` carrying the repository's message, except a
//! duplicate account number on creation, which is a `Conflict`.
//!
//! # Concurrency
//!
//! Withdrawals and deposits read the account, compute the new balance and
//! write the whole record back without locking. Two concurrent withdrawals
//! on one account can both pass the balance check.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::account::{Account, AmountRequest, CreateAccountRequest, NewAccount},
    repository::{AccountRepository, RepositoryError},
};

/// Business operations on accounts.
///
/// Cloning is cheap; all clones share one repository.
#[derive(Clone)]
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Account with id {id} not found"))
}

/// Map a repository failure for account `id`.
fn downgrade(id: Option<i32>, error: RepositoryError) -> AppError {
    match (error, id) {
        (RepositoryError::NotFound, Some(id)) => not_found(id),
        (RepositoryError::NotFound, None) => AppError::NotFound("Account not found".to_string()),
        (error, _) => {
            tracing::warn!(error = %error, "repository failure reported as bad request");
            AppError::BadRequest(error.to_string())
        }
    }
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    /// All accounts, ordered by id. An empty store yields an empty list.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        self.repository
            .find_all()
            .await
            .map_err(|e| downgrade(None, e))
    }

    pub async fn get_account(&self, id: i32) -> Result<Account, AppError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| downgrade(Some(id), e))?
            .ok_or_else(|| not_found(id))
    }

    /// Validate `request` and store the new account.
    ///
    /// # Errors
    ///
    /// - `BadRequest`: a field is missing or invalid (all messages listed)
    /// - `Conflict`: the account number is already in use
    /// - `BadRequest`: any other storage failure
    pub async fn create_account(&self, request: CreateAccountRequest) -> Result<Account, AppError> {
        let new_account = NewAccount::try_from(request)?;
        let number = new_account.number;

        match self.repository.create(new_account).await {
            Ok(account) => {
                tracing::info!(id = account.id, number, "account created");
                Ok(account)
            }
            Err(RepositoryError::UniqueViolation { field }) if field == "number" => {
                Err(AppError::Conflict("Account number must be unique".to_string()))
            }
            Err(error) => Err(downgrade(None, error)),
        }
    }

    /// Take `amount` out of account `id`.
    ///
    /// Fails with `BadRequest("Insufficient balance")` and leaves the account
    /// untouched when `amount` exceeds the balance.
    pub async fn withdraw(&self, id: i32, request: AmountRequest) -> Result<Account, AppError> {
        let amount = request.into_amount()?;
        let mut account = self.get_account(id).await?;

        if amount > account.balance {
            return Err(AppError::BadRequest("Insufficient balance".to_string()));
        }

        account.balance -= amount;
        self.repository
            .update(id, &account)
            .await
            .map_err(|e| downgrade(Some(id), e))
    }

    /// Add `amount` to account `id`.
    ///
    /// There is no business limit; only a sum too large to represent is
    /// rejected, leaving the account untouched.
    pub async fn deposit(&self, id: i32, request: AmountRequest) -> Result<Account, AppError> {
        let amount = request.into_amount()?;
        let mut account = self.get_account(id).await?;

        let balance = account.balance + amount;
        if !balance.is_finite() {
            return Err(AppError::BadRequest(
                "Resulting balance is out of range".to_string(),
            ));
        }

        account.balance = balance;
        self.repository
            .update(id, &account)
            .await
            .map_err(|e| downgrade(Some(id), e))
    }

    /// Remove account `id` permanently. Returns `true` on success.
    pub async fn delete_account(&self, id: i32) -> Result<bool, AppError> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(|e| downgrade(Some(id), e))?;

        if !deleted {
            return Err(not_found(id));
        }

        tracing::info!(id, "account deleted");
        Ok(true)
    }

    /// Probe the storage backend.
    pub async fn health(&self) -> Result<(), AppError> {
        self.repository
            .ping()
            .await
            .map_err(|e| AppError::Unavailable(e.to_string()))
    }
}
