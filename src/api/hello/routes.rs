// Hello route definitions

use axum::{routing::any, Router};

use crate::config::state::AppState;
use super::handler;

/// Registers `/hello` for every HTTP method
pub fn hello_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", any(handler::hello_handler))
}
