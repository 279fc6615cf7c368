// Application state shared by every request handler

use std::sync::Arc;
use crate::config::environment::EnvironmentVariables;

#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
}

impl AppState {
    /// Wraps an already loaded configuration
    pub fn new(environment: EnvironmentVariables) -> Self {
        Self {
            environment: Arc::new(environment),
        }
    }

    /// Loads configuration from the process environment (and `.env`)
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(EnvironmentVariables::load()?))
    }
}
