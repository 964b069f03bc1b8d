use lh_auth::JwtValidator;
use lh_db::{LogRepository, UserRepository};
use lh_geo::{DisabledGeoResolver, GeoResolver, HttpGeoResolver};
use lh_server::{ApiState, build_router, error, logger};
use lh_ws::{
    AppState, BroadcastDispatcher, BroadcastQueue, ConnectionConfig, ConnectionRegistry, Metrics,
    ShutdownCoordinator, spawn_consumer,
};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = lh_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = lh_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting lh-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool and run migrations
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = lh_db::connect(&database_path).await?;
    info!("Database ready");

    // Create JWT validator
    let jwt_validator = if let Some(ref secret) = config.auth.jwt_secret {
        info!("JWT: HS256 authentication enabled");
        JwtValidator::with_hs256(secret.as_bytes())
    } else if let Some(ref key_path) = config.auth.jwt_public_key_path {
        let config_dir = lh_config::Config::config_dir()?;
        let full_path = config_dir.join(key_path);
        let public_key = std::fs::read_to_string(&full_path).map_err(|e| {
            error::ServerError::JwtKeyFile {
                path: full_path.display().to_string(),
                source: e,
            }
        })?;
        info!("JWT: RS256 authentication enabled");
        JwtValidator::with_rs256(&public_key)?
    } else {
        unreachable!("validate() ensures exactly one JWT credential source")
    };
    let jwt_validator = Arc::new(jwt_validator);

    // Create geo resolver (disabled when no endpoint is configured)
    let geo: Arc<dyn GeoResolver> = match config.geo.endpoint {
        Some(ref endpoint) => {
            info!("Geo resolution enabled: {endpoint}");
            Arc::new(HttpGeoResolver::new(
                endpoint.clone(),
                Duration::from_secs(config.geo.timeout_secs),
            )?)
        }
        None => {
            info!("Geo resolution disabled, placeholder entries will be emitted");
            Arc::new(DisabledGeoResolver)
        }
    };

    // Repositories
    let logs = Arc::new(LogRepository::new(pool.clone()));
    let users = Arc::new(UserRepository::new(pool.clone()));

    // Connection registry, metrics, shutdown coordinator
    let registry = ConnectionRegistry::new();
    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();

    let connection_config = ConnectionConfig {
        send_buffer_size: config.websocket.send_buffer_size,
        heartbeat_interval_secs: config.websocket.heartbeat_interval_secs,
    };

    // Build WebSocket application state
    let ws_state = AppState {
        jwt_validator: Arc::clone(&jwt_validator),
        users: Arc::clone(&users),
        registry: registry.clone(),
        metrics: metrics.clone(),
        shutdown: shutdown.clone(),
        config: connection_config,
    };

    // Broadcast engine: queue feeds the dispatcher, one event per commit
    let dispatcher = BroadcastDispatcher::new(
        registry.clone(),
        Arc::clone(&logs),
        Arc::clone(&users),
        Arc::clone(&geo),
        metrics.clone(),
    );
    let (queue, queue_rx) = BroadcastQueue::new();
    spawn_consumer(dispatcher, queue_rx);

    let api_state = ApiState {
        jwt_validator,
        logs,
        users,
        queue,
    };

    // Build router
    let app = build_router(ws_state, api_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.subscribe_guard().wait().await;
            info!("Graceful shutdown complete");
        })
        .await?;

    Ok(())
}
