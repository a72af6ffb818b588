//! Site configuration
//!
//! Settings are read once at startup from defaults overlaid with
//! `SITE_`-prefixed environment variables.

use anyhow::Result;
use common::InMemoryContactStore;
use serde::Deserialize;
use tracing::warn;

/// Secret used when `SITE_JWT_SECRET` is not set. Refused in production.
pub const DEV_JWT_SECRET: &str = "development-secret-change-me";

/// Password seeded for the admin user when no hash is configured.
/// Refused in production.
pub const DEV_ADMIN_PASSWORD: &str = "admin123";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    /// Deployment environment; production turns on `Secure` cookies
    pub environment: Environment,
    /// HMAC secret for signing session tokens
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default: 7 days)
    pub token_ttl_seconds: u64,
    /// Email of the seeded admin user
    pub admin_email: String,
    /// Argon2 PHC hash of the admin password
    pub admin_password_hash: Option<String>,
    /// Plaintext admin password, hashed at startup when no hash is given
    pub admin_password: Option<String>,
    /// Maximum number of contact messages kept in memory
    pub contact_store_limit: usize,
}

impl SiteConfig {
    /// Create a new SiteConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SITE_BIND_ADDRESS`: listener address (default: "0.0.0.0:3000")
    /// - `SITE_ENVIRONMENT`: "development" or "production" (default: "development")
    /// - `SITE_JWT_SECRET`: token signing secret (required in production)
    /// - `SITE_TOKEN_TTL_SECONDS`: token lifetime (default: 604800)
    /// - `SITE_ADMIN_EMAIL`: admin login (default: "admin@example.com")
    /// - `SITE_ADMIN_PASSWORD_HASH`: Argon2 hash of the admin password (required in production)
    /// - `SITE_ADMIN_PASSWORD`: plaintext admin password, development only
    /// - `SITE_CONTACT_STORE_LIMIT`: contact messages kept (default: 10000)
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("environment", "development")?
            .set_default("jwt_secret", DEV_JWT_SECRET)?
            .set_default("token_ttl_seconds", 604_800_i64)?
            .set_default("admin_email", "admin@example.com")?
            .set_default(
                "contact_store_limit",
                InMemoryContactStore::DEFAULT_LIMIT as i64,
            )?
            .add_source(config::Environment::with_prefix("SITE"))
            .build()?;

        let mut site_config: SiteConfig = settings.try_deserialize()?;
        site_config.apply_development_fallbacks();
        site_config.validate()?;

        Ok(site_config)
    }

    /// Fill in development-only defaults that must never reach production
    fn apply_development_fallbacks(&mut self) {
        if self.environment.is_production() {
            return;
        }

        if self.jwt_secret == DEV_JWT_SECRET {
            warn!("SITE_JWT_SECRET not set, using the development secret");
        }

        if self.admin_password_hash.is_none() && self.admin_password.is_none() {
            warn!("No admin password configured, using the development default");
            self.admin_password = Some(DEV_ADMIN_PASSWORD.to_string());
        }
    }

    /// Reject settings that cannot produce a working or safe service
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.is_empty() {
            anyhow::bail!("SITE_JWT_SECRET must not be empty");
        }

        if self.token_ttl_seconds == 0 {
            anyhow::bail!("SITE_TOKEN_TTL_SECONDS must be greater than zero");
        }

        if self.admin_email.is_empty() {
            anyhow::bail!("SITE_ADMIN_EMAIL must not be empty");
        }

        if self.admin_password_hash.is_none() && self.admin_password.is_none() {
            anyhow::bail!("Either SITE_ADMIN_PASSWORD_HASH or SITE_ADMIN_PASSWORD must be set");
        }

        if self.environment.is_production() {
            if self.jwt_secret == DEV_JWT_SECRET {
                anyhow::bail!("SITE_JWT_SECRET must be set in production");
            }
            if self.admin_password_hash.is_none() {
                anyhow::bail!("SITE_ADMIN_PASSWORD_HASH must be set in production");
            }
        }

        Ok(())
    }
}
