//! User model and related functionality

use serde::Deserialize;

/// User entity
///
/// Users are seeded at startup and never change for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
}

/// User login credentials
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCredentials {
    pub email: Option<String>,
    pub password: Option<String>,
}
