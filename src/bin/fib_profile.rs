// Start of file: src/bin/fib_profile.rs

// Computes fibonacci(FIB_N) FIB_ITERATIONS times under the CPU profiler

use anyhow::Result;

use hello_pprof::config::environment::EnvironmentVariables;
use hello_pprof::core::logging::init_tracing;
use hello_pprof::profiling::{cpu_profile::run_profiled, fib_loop};

fn main() -> Result<()> {
    init_tracing();

    let env: EnvironmentVariables = EnvironmentVariables::load()?;

    run_profiled(&env.profile_output, env.profile_frequency, || {
        fib_loop::run(env.fib_n, env.fib_iterations)
    })?;

    Ok(())
}

// End of file: src/bin/fib_profile.rs
