// Application server configuration and setup

use axum::{
    Router,
    middleware::from_fn,
    extract::DefaultBodyLimit,
    error_handling::HandleErrorLayer,
    serve,
};
use tower::{ServiceBuilder, timeout::TimeoutLayer};
use tokio::{signal, net::TcpListener};
use listenfd::ListenFd;
use anyhow::{Context, Result};
use std::{fmt, future::Future, net::SocketAddr};
use tracing::{error, info};

use crate::api::hello::routes::hello_routes;
use crate::config::{environment::EnvironmentVariables, state::AppState};
use crate::utils::{
    error_handler::{handle_global_error, not_found_handler},
    request_timer::request_timer,
};

/// Creates and configures the application router with all middleware layers
pub fn create_app(state: AppState) -> Router {
    let env: &EnvironmentVariables = &state.environment;

    Router::new()
        .merge(hello_routes())
        .fallback(not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_timer))
                .layer(HandleErrorLayer::new(handle_global_error))
                .layer(TimeoutLayer::new(env.request_timeout()))
                .layer(DefaultBodyLimit::max(env.max_request_body_size))
        )
        .with_state(state)
}

/// Sets up the TCP listener from an inherited socket or binds to HOST:PORT
pub async fn setup_listener(env: &EnvironmentVariables) -> Result<TcpListener> {
    let mut listenfd: ListenFd = ListenFd::from_env();

    let listener: TcpListener = match listenfd.take_tcp_listener(0)? {
        Some(std_listener) => {
            std_listener.set_nonblocking(true)?;
            TcpListener::from_std(std_listener)?
        }
        None => {
            let addr: String = env.bind_address();
            TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?
        }
    };

    Ok(listener)
}

/// Serves the app on an already bound listener until SIGINT or SIGTERM
pub async fn run(listener: TcpListener, state: AppState) -> Result<()> {
    serve_until(listener, state, async {
        let reason: ShutdownReason = shutdown_signal().await;
        info!("Received {reason}, draining in-flight requests");
    })
    .await
}

/// Serves the app until `shutdown` resolves, then waits for open requests to finish
pub async fn serve_until<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = listener.local_addr()?;
    info!("Starting at {addr}");

    serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server terminated with an error")?;

    info!("Stopped serving on {addr}");
    Ok(())
}

/// Which signal ended the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("SIGINT"),
            Self::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Resolves with the first shutdown signal. A signal whose handler cannot be
/// installed is logged and never fires; the other one still can.
pub async fn shutdown_signal() -> ShutdownReason {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Cannot listen for SIGINT: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Cannot listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => ShutdownReason::Interrupt,
        _ = terminate => ShutdownReason::Terminate,
    }
}
