// Start of file: /src/config/environment.rs

// * Environment configuration for the hello service and the profiling tools,
// * with zero-copy defaults.

use std::{borrow::Cow, collections::HashMap, path::PathBuf, str::FromStr, time::Duration};
// * anyhow for convenient error handling
use anyhow::{ensure, Context, Result};
use crate::profiling::fibonacci::MAX_FIB_N;
use tracing::warn;

// ! Default values for environment variables (used if variables aren't set):
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HELLO_DELAY_MS: u64 = 1_000;
const DEFAULT_MAX_BODY_SIZE: usize = 2_097_152; // 2MB
const DEFAULT_TIMEOUT: u64 = 3; // 3 seconds
const DEFAULT_PROFILE_OUTPUT: &str = "cpu.pprof";
const DEFAULT_PROFILE_FREQUENCY: i32 = 100; // samples per second
const DEFAULT_FIB_N: u64 = 45;
const DEFAULT_FIB_ITERATIONS: u32 = 5;

// * A struct containing all environment variables used by the binaries
#[derive(Clone, Debug)]
pub struct EnvironmentVariables {
    pub environment: Cow<'static, str>,
    pub host: Cow<'static, str>,
    pub port: u16,
    pub hello_delay_ms: u64,
    pub max_request_body_size: usize,
    pub default_timeout_seconds: u64,
    pub profile_output: PathBuf,
    pub profile_frequency: i32,
    pub fib_n: u64,
    pub fib_iterations: u32,
}

impl Default for EnvironmentVariables {
    fn default() -> Self {
        Self {
            environment: Cow::Borrowed(DEFAULT_ENVIRONMENT),
            host: Cow::Borrowed(DEFAULT_HOST),
            port: DEFAULT_PORT,
            hello_delay_ms: DEFAULT_HELLO_DELAY_MS,
            max_request_body_size: DEFAULT_MAX_BODY_SIZE,
            default_timeout_seconds: DEFAULT_TIMEOUT,
            profile_output: PathBuf::from(DEFAULT_PROFILE_OUTPUT),
            profile_frequency: DEFAULT_PROFILE_FREQUENCY,
            fib_n: DEFAULT_FIB_N,
            fib_iterations: DEFAULT_FIB_ITERATIONS,
        }
    }
}

// * Parses an optional numeric variable, naming the key on failure
fn parse_var<T>(key: &str, value: Option<&str>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .map(|s| s.trim().parse::<T>().with_context(|| format!("Invalid {key} value: {s:?}")))
        .transpose()
        .map(|parsed| parsed.unwrap_or(default))
}

// * Same as parse_var, then rejects values outside `accepted`
fn parse_var_in<T>(
    key: &str,
    value: Option<&str>,
    default: T,
    accepted: impl std::ops::RangeBounds<T> + std::fmt::Debug,
) -> Result<T>
where
    T: FromStr + PartialOrd + std::fmt::Debug,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let parsed: T = parse_var(key, value, default)?;
    ensure!(
        accepted.contains(&parsed),
        "Invalid {key} value: {parsed:?} (accepted: {accepted:?})"
    );
    Ok(parsed)
}

impl EnvironmentVariables {
    // * Loads environment variables from the process and .env.
    // * Only reads .env if ENVIRONMENT != "production".
    pub fn load() -> Result<Self> {
        // ? In non-production environments, attempt to load .env
        if std::env::var("ENVIRONMENT").unwrap_or_default() != "production" {
            dotenv::dotenv().ok();
        }

        // * Collect all environment vars from the system and .env
        let vars: HashMap<String, String> = std::env::vars()
            .chain(dotenv::vars())
            .collect();

        Self::from_lookup(|key| vars.get(key).map(String::as_str))
    }

    // * Builds the configuration from any key lookup, providing defaults if missing
    pub fn from_lookup<'a, F>(get_var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        Ok(Self {
            environment: get_var("ENVIRONMENT")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or_else(|| {
                    warn!("Missing ENVIRONMENT, defaulting to '{DEFAULT_ENVIRONMENT}'");
                    Cow::Borrowed(DEFAULT_ENVIRONMENT)
                }),

            host: get_var("HOST")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_HOST)),

            port: parse_var("PORT", get_var("PORT"), DEFAULT_PORT)?,

            hello_delay_ms: parse_var("HELLO_DELAY_MS", get_var("HELLO_DELAY_MS"), DEFAULT_HELLO_DELAY_MS)?,

            max_request_body_size: parse_var(
                "MAX_REQUEST_BODY_SIZE",
                get_var("MAX_REQUEST_BODY_SIZE"),
                DEFAULT_MAX_BODY_SIZE,
            )?,

            default_timeout_seconds: parse_var(
                "DEFAULT_TIMEOUT_SECONDS",
                get_var("DEFAULT_TIMEOUT_SECONDS"),
                DEFAULT_TIMEOUT,
            )?,

            profile_output: get_var("PROFILE_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_OUTPUT)),

            // ! pprof divides by the frequency; zero or negative rates must not reach it
            profile_frequency: parse_var_in(
                "PROFILE_FREQUENCY",
                get_var("PROFILE_FREQUENCY"),
                DEFAULT_PROFILE_FREQUENCY,
                1..,
            )?,

            // ! fibonacci(n) no longer fits in a u64 past MAX_FIB_N
            fib_n: parse_var_in("FIB_N", get_var("FIB_N"), DEFAULT_FIB_N, ..=MAX_FIB_N)?,

            fib_iterations: parse_var("FIB_ITERATIONS", get_var("FIB_ITERATIONS"), DEFAULT_FIB_ITERATIONS)?,
        })
    }

    pub fn hello_delay(&self) -> Duration {
        Duration::from_millis(self.hello_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_seconds)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}


// End of file: /src/config/environment.rs
