//! Credential store backed by a fixed, in-memory user list

use std::sync::Arc;

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use tracing::{error, info, warn};

use crate::{config::SiteConfig, models::User};

/// Plaintext behind the decoy hash checked when an email is unknown
const DECOY_PASSWORD: &str = "decoy-password-never-matches";

/// Credential store
///
/// Holds the users seeded at startup. Lookups are linear scans; the list is
/// tiny and never changes.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<[User]>,
    decoy_hash: Arc<str>,
}

impl CredentialStore {
    /// Create a credential store from an explicit user list
    ///
    /// Fails if two users share an email or a stored hash is not a valid
    /// PHC string.
    pub fn new(users: Vec<User>) -> Result<Self> {
        for (i, user) in users.iter().enumerate() {
            if users[..i].iter().any(|other| other.email == user.email) {
                anyhow::bail!("Duplicate user email: {}", user.email);
            }
            PasswordHash::new(&user.password_hash).map_err(|e| {
                anyhow::anyhow!("Invalid password hash for user {}: {}", user.id, e)
            })?;
        }

        let decoy_hash = hash_password(DECOY_PASSWORD)?;

        Ok(Self {
            users: users.into(),
            decoy_hash: decoy_hash.into(),
        })
    }

    /// Create the credential store holding the configured admin user
    pub fn seeded(config: &SiteConfig) -> Result<Self> {
        let password_hash = match (&config.admin_password_hash, &config.admin_password) {
            (Some(hash), _) => hash.clone(),
            (None, Some(password)) => hash_password(password)?,
            (None, None) => anyhow::bail!("No admin password or password hash configured"),
        };

        info!("Seeding admin user: {}", config.admin_email);

        Self::new(vec![User {
            id: 1,
            email: config.admin_email.clone(),
            password_hash,
        }])
    }

    /// Find a user by email (case-sensitive exact match)
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email == email)
    }

    /// Check an email/password pair
    ///
    /// Returns the user on success. An unknown email and a wrong password
    /// both yield `None`, and both perform one hash verification.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        match self.find_user_by_email(email) {
            Some(user) => {
                if verify_password(password, &user.password_hash) {
                    Some(user.clone())
                } else {
                    warn!("Password mismatch for user {}", user.id);
                    None
                }
            }
            None => {
                let _ = verify_password(password, &self.decoy_hash);
                warn!("Login attempt for unknown email");
                None
            }
        }
    }
}

/// Hash a password with Argon2 and a random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a PHC hash string
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to parse password hash: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
