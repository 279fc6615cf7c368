// Library root for the hello service and the CPU profiling tools

pub mod api;
pub mod config;
pub mod core;
pub mod profiling;
pub mod utils;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
