//! Account data models and API request types.
//!
//! This module defines:
//! - `Account`: Database entity representing a bank account
//! - `AccountType`: The fixed set of account kinds
//! - `CreateAccountRequest`: Request body for creating accounts
//! - `AmountRequest`: Request body for withdrawals and deposits
//! - `NewAccount`: A validated creation request, ready for persistence

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// Message returned whenever `type` is missing or not a known account type.
pub const ACCOUNT_TYPE_MESSAGE: &str = "type must be one of the following values: SAVINGS, CHECKING";

/// Kind of bank account.
///
/// Stored as the PostgreSQL enum `account_type` and serialized with the
/// same upper-case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "account_type", rename_all = "UPPERCASE")]
pub enum AccountType {
    Savings,
    Checking,
}

impl AccountType {
    /// Parse the wire name of an account type.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SAVINGS" => Some(AccountType::Savings),
            "CHECKING" => Some(AccountType::Checking),
            _ => None,
        }
    }
}

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `accounts` table. `number` carries a unique constraint
/// (`accounts_number_key`); `id` and both timestamps are assigned by the
/// database.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Account {
    /// Identifier assigned on insert, never changed afterwards
    pub id: i32,

    /// Account number, unique across all accounts
    pub number: i64,

    /// Agency (branch) code
    pub ag: String,

    /// Current balance
    ///
    /// Only withdrawals and deposits change it; a withdrawal never takes it
    /// below zero.
    pub balance: f64,

    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub account_type: AccountType,

    pub created_at: DateTime<Utc>,

    /// Refreshed by every update
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "number": 123,
///   "ag": "ABC",
///   "type": "SAVINGS",
///   "balance": 100
/// }
/// ```
///
/// Every field is optional at the deserialization level so that a missing
/// field is reported by validation with its own message instead of a
/// generic JSON error. `type` is accepted as any JSON value for the same
/// reason.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(required(message = "number should not be empty"))]
    pub number: Option<i64>,

    #[validate(
        required(message = "ag should not be empty"),
        length(min = 1, message = "ag should not be empty")
    )]
    pub ag: Option<String>,

    #[serde(rename = "type")]
    #[validate(
        required(message = "type must be one of the following values: SAVINGS, CHECKING"),
        custom = "validate_account_type"
    )]
    pub account_type: Option<Value>,

    #[validate(required(message = "balance should not be empty"))]
    pub balance: Option<f64>,
}

fn validate_account_type(value: &Value) -> Result<(), ValidationError> {
    if value.as_str().and_then(AccountType::parse).is_some() {
        return Ok(());
    }

    let mut error = ValidationError::new("is_enum");
    error.message = Some(Cow::Borrowed(ACCOUNT_TYPE_MESSAGE));
    Err(error)
}

/// Request body for `PATCH /account/{id}` (withdraw) and
/// `PATCH /account/deposit/{id}` (deposit).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AmountRequest {
    #[validate(
        required(message = "amount should not be empty"),
        range(min = 0.0, message = "amount must not be less than 0")
    )]
    pub amount: Option<f64>,
}

/// A creation request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub number: i64,
    pub ag: String,
    pub balance: f64,
    pub account_type: AccountType,
}

impl TryFrom<CreateAccountRequest> for NewAccount {
    type Error = validator::ValidationErrors;

    fn try_from(request: CreateAccountRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        // validate() guarantees every field below is present and well formed
        match (
            request.number,
            request.ag,
            request.balance,
            request
                .account_type
                .as_ref()
                .and_then(Value::as_str)
                .and_then(AccountType::parse),
        ) {
            (Some(_), Some(_), Some(balance), Some(_)) if !balance.is_finite() => {
                let mut errors = validator::ValidationErrors::new();
                let mut error = ValidationError::new("finite");
                error.message = Some(Cow::Borrowed("balance must be a finite number"));
                errors.add("balance", error);
                Err(errors)
            }
            (Some(number), Some(ag), Some(balance), Some(account_type)) => Ok(NewAccount {
                number,
                ag,
                balance,
                account_type,
            }),
            _ => {
                let mut errors = validator::ValidationErrors::new();
                errors.add("request", ValidationError::new("incomplete"));
                Err(errors)
            }
        }
    }
}

impl AmountRequest {
    /// Validate and extract the amount.
    pub fn into_amount(self) -> Result<f64, validator::ValidationErrors> {
        self.validate()?;
        match self.amount {
            Some(amount) => Ok(amount),
            None => {
                let mut errors = validator::ValidationErrors::new();
                errors.add("amount", ValidationError::new("required"));
                Err(errors)
            }
        }
    }
}
