//! Custom error types for the common library
//!
//! This module defines the error types returned by the shared stores.

use thiserror::Error;

/// Custom error type for store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store already holds as many records as it is allowed to
    #[error("Store capacity exceeded: limit is {limit} records")]
    CapacityExceeded { limit: usize },
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
