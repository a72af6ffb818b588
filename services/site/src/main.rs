use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod credentials;
mod error;
mod jwt;
mod middleware;
mod models;
mod pages;
mod routes;
mod session;
mod state;
mod validation;

pub use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting site service");

    let site_config = config::SiteConfig::from_env()?;
    let app_state = AppState::from_config(&site_config)?;

    info!(
        "Site service initialized ({:?}, session lifetime {}s)",
        site_config.environment,
        app_state.jwt_service.token_ttl()
    );

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&site_config.bind_address).await?;
    info!("Site service listening on {}", site_config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
