// Start of file: /src/profiling/mod.rs

/*
    * CPU profiling: the Fibonacci workload, a pprof recording session,
    * and a reader that summarizes recorded profiles.
*/

pub mod analyzer;
pub mod cpu_profile;
pub mod fib_loop;
pub mod fibonacci;
pub mod proto;
pub mod report;

// End of file: /src/profiling/mod.rs
