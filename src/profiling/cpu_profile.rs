// CPU profiling session writing a gzip-compressed pprof protobuf

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use flate2::{write::GzEncoder, Compression};
use pprof::protos::Message;
use pprof::{ProfilerGuard, ProfilerGuardBuilder};
use tracing::{info, instrument};

// Frames from these libraries are noise inside the signal handler
const BLOCKLIST: &[&str] = &["libc", "libgcc", "pthread", "vdso"];

/// An active sampling profiler bound to its output file.
///
/// The file is created before sampling starts, so an unwritable path is
/// reported before any profiled work runs.
pub struct CpuProfile {
    path: PathBuf,
    file: File,
    guard: ProfilerGuard<'static>,
}

impl CpuProfile {
    /// Creates `path` and starts sampling at `frequency` Hz
    pub fn start(path: impl AsRef<Path>, frequency: i32) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();

        // pprof's timer divides by the rate
        ensure!(frequency > 0, "could not start CPU profile: frequency must be positive, got {frequency}");

        let file: File = File::create(&path)
            .with_context(|| format!("could not create CPU profile {}", path.display()))?;

        let guard: ProfilerGuard<'static> = ProfilerGuardBuilder::default()
            .frequency(frequency)
            .blocklist(BLOCKLIST)
            .build()
            .context("could not start CPU profile")?;

        info!("CPU profiling to {} at {} Hz", path.display(), frequency);

        Ok(Self { path, file, guard })
    }

    /// Stops sampling and writes the collected profile
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn finish(self) -> Result<PathBuf> {
        let Self { path, file, guard } = self;

        let report = guard
            .report()
            .build()
            .context("could not build CPU profile report")?;
        drop(guard);

        let profile = report.pprof().context("could not convert report to pprof")?;

        let mut encoded: Vec<u8> = Vec::with_capacity(profile.encoded_len());
        profile
            .encode(&mut encoded)
            .context("could not encode pprof protobuf")?;

        let mut encoder: GzEncoder<File> = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(&encoded)
            .and_then(|_| encoder.try_finish())
            .with_context(|| format!("could not write CPU profile {}", path.display()))?;

        info!("Wrote {} samples to {}", profile.sample.len(), path.display());

        Ok(path)
    }
}

/// Runs `workload` under the profiler, writing the profile to `path`.
///
/// The workload never runs when the file cannot be created or the profiler
/// cannot start.
pub fn run_profiled<T, F>(path: impl AsRef<Path>, frequency: i32, workload: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    let session: CpuProfile = CpuProfile::start(path, frequency)?;
    let output: T = workload();
    session.finish()?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::cell::Cell;

    #[test]
    #[serial(profiler)]
    fn unwritable_path_never_runs_the_workload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("cpu.pprof");
        let ran = Cell::new(false);

        let result = run_profiled(&path, 100, || ran.set(true));

        assert!(result.is_err());
        assert!(!ran.get());
        assert!(!path.exists());
    }

    #[test]
    #[serial(profiler)]
    fn non_positive_frequency_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        for frequency in [0, -1] {
            let ran = Cell::new(false);
            let result = run_profiled(dir.path().join("cpu.pprof"), frequency, || ran.set(true));

            let err = result.expect_err("frequency must be rejected");
            assert!(err.to_string().contains("frequency must be positive"), "{err}");
            assert!(!ran.get());
        }
    }

    #[test]
    #[serial(profiler)]
    fn second_session_is_rejected_while_one_is_active() {
        let dir = tempfile::tempdir().unwrap();
        let first = CpuProfile::start(dir.path().join("first.pprof"), 100).unwrap();
        let ran = Cell::new(false);

        let second = run_profiled(dir.path().join("second.pprof"), 100, || ran.set(true));

        assert!(second.is_err());
        assert!(!ran.get());
        first.finish().unwrap();
    }

    #[test]
    #[serial(profiler)]
    fn writes_a_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpu.pprof");

        let value = run_profiled(&path, 100, || crate::profiling::fibonacci::fibonacci(20)).unwrap();

        assert_eq!(value, 6765);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }
}
