//! Account HTTP handlers.
//!
//! This module implements the account API endpoints:
//! - POST /account - Create new account
//! - GET /account - List all accounts
//! - GET /account/{id} - Get account by ID
//! - PATCH /account/{id} - Withdraw from an account
//! - PATCH /account/deposit/{id} - Deposit into an account
//! - DELETE /account/{id} - Delete an account
//!
//! Handlers only extract parameters; all rules live in `AccountService`.
//! Body and path extraction failures are reported as `400 Bad Request`.

use crate::{
    error::AppError,
    models::account::{Account, AmountRequest, CreateAccountRequest},
    services::account_service::AccountService,
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

/// Create a new account.
///
/// # Request Body
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
/// # Response
///
/// - **Success (201 Created)**: Returns the created account
/// - **Error (400)**: Missing or invalid field
/// - **Error (409)**: Account number already in use
pub async fn create_account(
    State(service): State<AccountService>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let Json(request) = payload?;
    let account = service.create_account(request).await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// List all accounts, ordered by id. The list may be empty.
pub async fn list_accounts(
    State(service): State<AccountService>,
) -> Result<Json<Vec<Account>>, AppError> {
    Ok(Json(service.list_accounts().await?))
}

/// Get a specific account by ID.
///
/// - **Error (404)**: No account with this ID
pub async fn get_account(
    State(service): State<AccountService>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Account>, AppError> {
    let Path(id) = id?;

    Ok(Json(service.get_account(id).await?))
}

/// Withdraw `amount` from an account.
///
/// # Request Body
///
/// ```json
/// { "amount": 25 }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the updated account
/// - **Error (400)**: Invalid amount or insufficient balance
/// - **Error (404)**: No account with this ID
pub async fn withdraw(
    State(service): State<AccountService>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<Account>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;

    Ok(Json(service.withdraw(id, request).await?))
}

/// Deposit `amount` into an account. Same body and errors as [`withdraw`],
/// minus the balance check.
pub async fn deposit(
    State(service): State<AccountService>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<Account>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;

    Ok(Json(service.deposit(id, request).await?))
}

/// Delete an account. Responds with `true`.
pub async fn delete_account(
    State(service): State<AccountService>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<bool>, AppError> {
    let Path(id) = id?;

    Ok(Json(service.delete_account(id).await?))
}
