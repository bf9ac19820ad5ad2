//! Photostream - a photo gallery server.
//!
//! This binary starts the HTTP server and configures all components.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photostream::{
    auth::{AdminCredentials, SessionAuth},
    config::Config,
    server::{create_router, AppState, RouterConfig},
    storage::{create_s3_client, S3BlobStorage},
    store::{connect_pool, PgPhotoStore},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Database: {}", redact_url(&config.database_url));
    info!("  S3 bucket: {}", config.s3_bucket);
    if let Some(ref endpoint) = config.s3_endpoint {
        info!("  S3 endpoint: {}", endpoint);
    }
    info!("  S3 region: {}", config.s3_region);
    info!("  Public image URL: {}", config.s3_public_url);
    info!("  Page size: {}", config.page_size);
    info!("  Admin: {}", config.admin_email);

    // Connect to Postgres and run migrations
    info!("");
    info!("Connecting to Postgres...");
    let pool = match connect_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("  Failed to connect to Postgres: {}", e);
            error!("");
            error!("  Please check:");
            error!("    - The database URL is correct");
            error!("    - The database exists and accepts connections");
            return ExitCode::FAILURE;
        }
    };
    let store = PgPhotoStore::new(pool);
    if let Err(e) = store.migrate().await {
        error!("  Migration failed: {}", e);
        return ExitCode::FAILURE;
    }
    info!("  Connected, schema up to date");

    // Create S3 client and verify the bucket is reachable
    info!("Connecting to S3...");
    let s3_client = create_s3_client(config.s3_endpoint.as_deref(), &config.s3_region).await;
    let storage = S3BlobStorage::new(
        s3_client,
        config.s3_bucket.clone(),
        config.s3_public_url.clone(),
    );
    if let Err(e) = storage.check_connection().await {
        error!("  Failed to connect to S3: {}", e);
        error!("");
        error!("  Please check:");
        error!("    - Your AWS credentials are configured correctly");
        error!("    - The bucket '{}' exists and is accessible", config.s3_bucket);
        error!("    - The S3 endpoint is correct (if using MinIO/custom S3)");
        return ExitCode::FAILURE;
    }
    info!("  Connected successfully");

    // Assemble application state
    let state = AppState::new(
        Arc::new(store),
        Arc::new(storage),
        SessionAuth::new(
            &config.auth_secret,
            Duration::from_secs(config.session_ttl_secs),
        ),
        AdminCredentials::new(config.admin_email.clone(), config.admin_password.clone()),
        config.page_size,
    );

    // Build router
    let router_config = build_router_config(&config);
    let router = create_router(state, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/api/photos", addr);
    info!("");
    info!("  Gallery:  http://{}/", addr);
    info!("  Admin:    http://{}/admin", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "photostream=debug,tower_http=debug"
    } else {
        "photostream=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config =
        RouterConfig::new().with_max_upload_bytes(config.max_upload_bytes);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}

/// Strip the password from a connection URL before logging it.
fn redact_url(url: &str) -> String {
    match url.split_once('@') {
        Some((head, tail)) => match head.rsplit_once(':') {
            Some((prefix, _)) => format!("{prefix}:****@{tail}"),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}
