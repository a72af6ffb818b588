//! Application state shared across handlers

use std::sync::Arc;

use anyhow::Result;
use common::{ContactStore, InMemoryContactStore};

use crate::{
    config::SiteConfig, credentials::CredentialStore, jwt::JwtService, session::SessionCookies,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub jwt_service: JwtService,
    pub session_cookies: SessionCookies,
    pub contact_store: Arc<dyn ContactStore>,
}

impl AppState {
    /// Build the state from configuration with an empty in-memory contact store
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let contact_store = Arc::new(InMemoryContactStore::new(config.contact_store_limit));
        Self::with_contact_store(config, contact_store)
    }

    /// Build the state around an externally owned contact store
    pub fn with_contact_store(
        config: &SiteConfig,
        contact_store: Arc<dyn ContactStore>,
    ) -> Result<Self> {
        let credentials = CredentialStore::seeded(config)?;
        let jwt_service = JwtService::new(&config.jwt_secret, config.token_ttl_seconds)?;
        let session_cookies = SessionCookies::new(
            config.environment.is_production(),
            config.token_ttl_seconds,
        );

        Ok(AppState {
            credentials,
            jwt_service,
            session_cookies,
            contact_store,
        })
    }
}
