// Reader for pprof CPU profiles with flat/cumulative hotspot aggregation

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use prost::Message;

use super::proto::{Function, Location, Profile, ValueType};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Time attributed to one function.
///
/// `flat` counts samples whose leaf frame is the function, `cum` counts
/// samples with the function anywhere on the stack (once per sample).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotspot {
    pub function: String,
    pub flat: i64,
    pub cum: i64,
}

#[derive(Debug, Clone)]
pub struct ProfileAnalyzer {
    profile: Profile,
}

impl ProfileAnalyzer {
    /// Reads a pprof file, gzip-compressed or raw protobuf
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path: &Path = path.as_ref();
        let raw: Vec<u8> = fs::read(path)
            .with_context(|| format!("could not read profile {}", path.display()))?;

        Self::decode(&raw).with_context(|| format!("could not parse profile {}", path.display()))
    }

    pub fn decode(raw: &[u8]) -> Result<Self> {
        let profile: Profile = if raw.starts_with(&GZIP_MAGIC) {
            let mut inflated: Vec<u8> = Vec::new();
            GzDecoder::new(raw)
                .read_to_end(&mut inflated)
                .context("invalid gzip stream")?;
            Profile::decode(inflated.as_slice())?
        } else {
            Profile::decode(raw)?
        };

        Ok(Self::from_profile(profile))
    }

    pub fn from_profile(profile: Profile) -> Self {
        Self { profile }
    }

    /// Sampling period, in nanoseconds for CPU profiles
    pub fn period(&self) -> i64 {
        self.profile.period
    }

    /// String table entry, or an empty string for an out-of-range index
    pub fn string(&self, index: i64) -> &str {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.profile.string_table.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// `(type, unit)` of every sample value column
    pub fn sample_types(&self) -> Vec<(&str, &str)> {
        self.profile
            .sample_type
            .iter()
            .map(|vt: &ValueType| (self.string(vt.kind), self.string(vt.unit)))
            .collect()
    }

    /// Aggregates samples per function, sorted by flat value, at most `max_entries` long
    pub fn hotspots(&self, max_entries: usize) -> Vec<Hotspot> {
        let locations: HashMap<u64, &Location> =
            self.profile.location.iter().map(|l| (l.id, l)).collect();
        let functions: HashMap<u64, &Function> =
            self.profile.function.iter().map(|f| (f.id, f)).collect();

        let mut totals: HashMap<&str, (i64, i64)> = HashMap::new();

        for sample in &self.profile.sample {
            let Some(&leaf) = sample.location_id.first() else {
                continue;
            };
            let value: i64 = sample.value.first().copied().unwrap_or(0);

            if let Some(name) = self.function_at(&locations, &functions, leaf) {
                totals.entry(name).or_default().0 += value;
            }

            // Recursive frames repeat the same function; credit it once
            let mut seen: HashSet<&str> = HashSet::new();
            for &location_id in &sample.location_id {
                if let Some(name) = self.function_at(&locations, &functions, location_id) {
                    if seen.insert(name) {
                        totals.entry(name).or_default().1 += value;
                    }
                }
            }
        }

        let mut hotspots: Vec<Hotspot> = totals
            .into_iter()
            .map(|(name, (flat, cum))| Hotspot {
                function: name.to_owned(),
                flat,
                cum,
            })
            .collect();

        hotspots.sort_by(|a, b| b.flat.cmp(&a.flat).then_with(|| a.function.cmp(&b.function)));
        hotspots.truncate(max_entries);
        hotspots
    }

    // Function name of the first line recorded at a location
    fn function_at(
        &self,
        locations: &HashMap<u64, &Location>,
        functions: &HashMap<u64, &Function>,
        location_id: u64,
    ) -> Option<&str> {
        let line = locations.get(&location_id)?.line.first()?;
        let function = functions.get(&line.function_id)?;
        Some(self.string(function.name))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::profiling::proto::{Function, Line, Location, Profile, Sample, ValueType};

    /// Three functions: `main -> fib -> fib` (recursive) and `main -> helper`.
    /// String table: 0 "", 1 samples, 2 count, 3 cpu, 4 nanoseconds, 5 main, 6 fib, 7 helper
    pub fn recursive_profile() -> Profile {
        let strings = ["", "samples", "count", "cpu", "nanoseconds", "main", "fib", "helper"];
        let function = |id: u64, name: i64| Function { id, name };
        let location = |id: u64, function_id: u64| Location {
            id,
            line: vec![Line { function_id, line: 0 }],
        };
        let sample = |stack: Vec<u64>, count: i64| Sample {
            location_id: stack,
            value: vec![count, count * 10_000_000],
        };

        Profile {
            sample_type: vec![
                ValueType { kind: 1, unit: 2 },
                ValueType { kind: 3, unit: 4 },
            ],
            sample: vec![
                // leaf first
                sample(vec![2, 2, 2, 1], 6),
                sample(vec![2, 1], 2),
                sample(vec![3, 1], 1),
                sample(vec![1], 1),
                sample(vec![], 50),
            ],
            location: vec![location(1, 1), location(2, 2), location(3, 3)],
            function: vec![function(1, 5), function(2, 6), function(3, 7)],
            string_table: strings.iter().map(|s| s.to_string()).collect(),
            period: 10_000_000,
        }
    }
}
