// Start of file: src/bin/pprof_report.rs

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use hello_pprof::core::logging::init_tracing;
use hello_pprof::profiling::{analyzer::ProfileAnalyzer, report::HotspotReport};

/// Summarizes a pprof CPU profile: sampling period, sample types and hotspots
#[derive(Parser, Debug)]
#[command(name = "pprof-report", version, about, long_about = None)]
struct Args {
    /// Profile to read (gzip-compressed or raw pprof protobuf)
    profile: PathBuf,

    /// Number of hotspots to list
    #[arg(short, long, default_value_t = 10)]
    top: usize,
}

fn main() -> Result<()> {
    init_tracing();

    let args: Args = Args::parse();
    let analyzer: ProfileAnalyzer = ProfileAnalyzer::read(&args.profile)?;

    print!("{}", HotspotReport::new(&analyzer, args.top));

    Ok(())
}

// End of file: src/bin/pprof_report.rs
