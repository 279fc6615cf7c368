// Start of file: src/main.rs

use anyhow::Result;
use tokio::net::TcpListener;

use hello_pprof::core::{logging::init_tracing, server};
use hello_pprof::config::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let state: AppState = AppState::from_env()?;

    // ! A bind failure ends the process before any request is served
    let listener: TcpListener = server::setup_listener(&state.environment).await?;

    server::run(listener, state).await
}

// End of file: src/main.rs
