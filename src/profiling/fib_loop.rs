// The profiled workload: fibonacci(n) computed a fixed number of times

use std::time::{Duration, Instant};
use tracing::info;

use super::fibonacci::fibonacci;

/// Computes `fibonacci(n)` `iterations` times in sequence, logging each result.
pub fn run(n: u64, iterations: u32) -> Vec<u64> {
    info!("Starting compute fibonacci...");
    let start: Instant = Instant::now();

    let results: Vec<u64> = (1..=iterations)
        .map(|i| {
            let result: u64 = fibonacci(n);
            info!("Time: {}, Result: {}", i, result);
            result
        })
        .collect();

    let elapsed: Duration = start.elapsed();
    info!("Complete, Time Cost: {:?}", elapsed);

    results
}
