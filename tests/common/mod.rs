//! tests/common/mod.rs
//! Runs the hello service in-process on a loopback port picked by the OS.

#![allow(dead_code)]

use hello_pprof::config::{environment::EnvironmentVariables, state::AppState};
use hello_pprof::core::server::{serve_until, setup_listener};

/// Default configuration, as the binary would load it from an empty environment.
pub fn test_env() -> EnvironmentVariables {
    EnvironmentVariables::default()
}

/// Binds `env` on 127.0.0.1 with an ephemeral port through the server's own
/// listener setup, serves it in the background and returns the base URL.
pub async fn spawn_app(env: EnvironmentVariables) -> String {
    let env = EnvironmentVariables {
        host: "127.0.0.1".into(),
        port: 0,
        ..env
    };

    let listener = setup_listener(&env).await.expect("loopback bind");
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    // Never shut down; the runtime drops the task when the test ends
    tokio::spawn(serve_until(listener, AppState::new(env), std::future::pending()));

    base_url
}
