//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params)
//! 2. Delegates to `AccountService`
//! 3. Returns HTTP response (JSON, status code)

/// Account endpoints
pub mod accounts;
/// Liveness and database connectivity probe
pub mod health;
