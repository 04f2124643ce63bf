//! # TzTalk HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Runs the REST data layer behind `tztalk srv`:
//! - Port availability checking with automatic fallback
//! - Request tracing and optional permissive CORS
//! - Graceful shutdown on Ctrl+C or SIGTERM
//!
//! ## Architecture
//!
//! 1. Find an available port, starting at the configured one
//! 2. Build the router over the shared `AppState`
//! 3. Print the startup banner
//! 4. Serve until a shutdown signal arrives
//!
//! ## Examples
//!
//! ```rust
//! let config = config::load_and_merge_config(args).await?;
//! let state = Arc::new(AppState::new(config, store));
//! server_logic::run_server(state).await?;
//! ```
//!
use super::routes;
use super::state::AppState;
use crate::core::error::Result;
use anyhow::Context;
use axum::Router;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

/// Ports tried after the configured one before giving up.
const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run HTTP Server (`run_server`)
///
/// Binds the first free port at or after `config.port` and serves the API
/// until shutdown.
///
/// ## Arguments
///
/// * `state`: Configuration and repositories shared by every handler.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after a graceful shutdown.
///
/// ## Errors
///
/// - No free port within `MAX_PORT_ATTEMPTS` tries.
/// - The listener cannot be bound.
/// - The Axum server fails while running.
pub async fn run_server(state: Arc<AppState>) -> Result<()> {
    let config = Arc::clone(&state.config);
    let addr = find_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let app = create_app(state);

    println!("\n=================================================================");
    println!("🕒 TzTalk API:        http://{}", addr);
    println!("❤️  Health check:      http://{}/health", addr);
    println!("👤 Current user id:   {}", config.current_user_id);
    println!("🌱 Demo data:         {}", config.seed_data);
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");

    info!("Starting API server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix. A handler that cannot be
/// installed never resolves.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port`, then each following port, until a bind succeeds.
///
/// ## Arguments
///
/// * `host`: Address to bind on.
/// * `start_port`: First port to try.
/// * `max_attempts`: Number of consecutive ports to try.
///
/// ## Returns
///
/// * `Result<SocketAddr>`: The first address that could be bound.
async fn find_available_port(host: IpAddr, start_port: u16, max_attempts: u8) -> Result<SocketAddr> {
    for attempt in 0..max_attempts {
        let Some(port) = start_port.checked_add(u16::from(attempt)) else {
            break;
        };
        let addr = SocketAddr::new(host, port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    port,
                    host,
                    e
                );
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        host,
        start_port,
        max_attempts
    )
}

/// # Create Axum Application (`create_app`)
///
/// Builds the API router over `state` with tracing and CORS middleware.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors_layer = if state.config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    routes::router()
        .layer(ServiceBuilder::new().layer(trace_layer).layer(cors_layer))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::srv::config::ServerConfig;
    use crate::common::store::Store;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::net::Ipv4Addr;
    use tower::ServiceExt;

    fn state(enable_cors: bool) -> Arc<AppState> {
        let config = ServerConfig {
            enable_cors,
            ..Default::default()
        };
        Arc::new(AppState::new(config, Store::in_memory()))
    }

    #[tokio::test]
    async fn test_find_available_port_start_is_free() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 50400;
        let addr = find_available_port(host, start_port, 5).await?;
        assert_eq!(addr.port(), start_port);
        assert_eq!(addr.ip(), host);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_available_port_start_occupied() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 51400;
        let _listener = TcpListener::bind(SocketAddr::new(host, start_port)).await?;

        let addr = find_available_port(host, start_port, 5).await?;
        assert!(addr.port() > start_port);
        assert!(addr.port() < start_port + 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_available_port_stops_at_u16_max() {
        let host: IpAddr = Ipv4Addr::LOCALHOST.into();
        let _listener = TcpListener::bind(SocketAddr::new(host, u16::MAX)).await;
        // Either u16::MAX was free (and is now held) or it was already taken.
        assert!(find_available_port(host, u16::MAX, 3).await.is_err());
    }

    #[tokio::test]
    async fn test_create_app_serves_health_with_cors() {
        let app = create_app(state(true));
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_create_app_without_cors() {
        let app = create_app(state(false));
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_empty_store_has_no_current_user() {
        let app = create_app(state(true));
        let request = Request::builder()
            .uri("/api/users/current")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
