//! Sanatory API server binary.
//!
//! Connects to PostgreSQL, runs migrations and serves the REST API.

use std::sync::Arc;

use clap::Parser;
use sanatory_api::config::{ApiConfig, parse_origins};
use sanatory_core::store::PgStore;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server.
///
/// Every option overrides the matching environment variable read by
/// [`ApiConfig::from_env`].
#[derive(Parser, Debug)]
#[command(name = "sanatory_api_server", about = "Sanatory API server")]
struct Args {
    /// Address to listen on (overrides `BIND_ADDR`).
    #[arg(long)]
    bind: Option<String>,

    /// PostgreSQL connection URL (overrides `DATABASE_URL`).
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Comma-separated origins allowed for credentialed CORS requests
    /// (overrides `CORS_ORIGINS`).
    #[arg(long)]
    cors_origins: Option<String>,

    /// Mark the refresh cookie `Secure` (also enabled by `SECURE_COOKIES`).
    #[arg(long)]
    secure_cookies: bool,
}

impl Args {
    fn apply(self, config: &mut ApiConfig) {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        if let Some(origins) = self.cors_origins {
            config.cors_origins = parse_origins(&origins);
        }
        config.secure_cookies |= self.secure_cookies;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| {
                    tracing_subscriber::EnvFilter::try_new(
                        "info,sanatory_api=debug,sanatory_core=debug",
                    )
                })?,
        )
        .init();

    let args = Args::parse();

    let max_connections = args.max_connections;
    let mut config = ApiConfig::from_env()?;
    args.apply(&mut config);
    let auth = config.auth_config()?;

    info!(
        bind = %config.bind_addr,
        max_connections,
        "starting sanatory_api_server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    sanatory_core::migrate::migrate(&pool).await?;

    let store = Arc::new(PgStore::new(pool));
    let state = sanatory_api::AppState::new(config.clone(), auth, store);
    let app = sanatory_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ApiConfig {
        ApiConfig::from_vars(|name| (name == "SECRET_KEY").then(|| "s3cret".to_string())).unwrap()
    }

    #[test]
    fn cli_options_override_environment() {
        let args = Args::try_parse_from([
            "sanatory_api_server",
            "--bind",
            "0.0.0.0:9000",
            "--cors-origins",
            "https://clinic.example",
            "--secure-cookies",
        ])
        .unwrap();
        let mut config = base();
        args.apply(&mut config);

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.cors_origins, vec!["https://clinic.example".to_string()]);
        assert!(config.secure_cookies);
    }

    #[test]
    fn absent_options_keep_environment_values() {
        let args = Args::try_parse_from(["sanatory_api_server"]).unwrap();
        let mut config = base();
        config.secure_cookies = true;
        let expected = config.clone();
        args.apply(&mut config);

        assert_eq!(config.bind_addr, expected.bind_addr);
        assert_eq!(config.database_url, expected.database_url);
        assert!(config.secure_cookies);
    }
}
