//! Catalog API Server Binary
//!
//! Starts the HTTP server for the employee and product resources.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin catalog-api
//!
//! # Run with environment variables
//! API_PORT=9090 API_DATABASE_URL=postgres://... cargo run --bin catalog-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8081)
//! * `API_CONTEXT_PATH` - Route prefix (default: /api)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_MASK_CREATE_FAILURES` - Answer 201 when a create fails (default: true)
//! * `API_STRICT_MAPPING` - Fail rows with unconvertible columns (default: false)
//! * `API_REQUIRE_DATABASE` - Refuse to start without a database (default: true)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, verify_connection, DatabaseError, DatabasePool, EmployeeRepository, ProductRepository, RowMapper};
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::load().context("Failed to load configuration")?;
    config.validate()?;

    init_tracing(&config.log_level, config.log_format);

    info!(
        host = %config.host,
        port = config.port,
        context_path = %config.context_path,
        "Starting Catalog API Server"
    );

    let state = match connect(&config).await {
        Ok(pool) => {
            let mapper = RowMapper::new(config.mapping_policy());
            AppState::new(config.clone())
                .with_employee_store(Arc::new(EmployeeRepository::new(pool.clone()).with_mapper(mapper)))
                .with_product_store(Arc::new(ProductRepository::new(pool).with_mapper(mapper)))
        }
        Err(e) if !config.require_database => {
            warn!(error = %e, "Database unavailable, serving in degraded mode");
            AppState::new(config.clone())
        }
        Err(e) => return Err(e).context("Database connection failed"),
    };

    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` takes precedence over `log_level`
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
    }
}

/// Creates the pool and checks the database answers
async fn connect(config: &ApiConfig) -> Result<DatabasePool, DatabaseError> {
    let pool = create_pool(config.database_config()).await?;
    verify_connection(&pool).await?;
    info!("Database ready");
    Ok(pool)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
