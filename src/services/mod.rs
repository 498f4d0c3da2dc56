//! Business logic services.
//!
//! Services contain the rules separated from HTTP handlers and storage.

pub mod account_service;
