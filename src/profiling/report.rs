// Text summary of a profile: period, sample types and the top hotspots

use std::fmt;

use super::analyzer::{Hotspot, ProfileAnalyzer};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Renders with `Display`; percentages are relative to the listed hotspots' flat total
pub struct HotspotReport<'a> {
    analyzer: &'a ProfileAnalyzer,
    hotspots: Vec<Hotspot>,
}

impl<'a> HotspotReport<'a> {
    pub fn new(analyzer: &'a ProfileAnalyzer, top: usize) -> Self {
        Self {
            analyzer,
            hotspots: analyzer.hotspots(top),
        }
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    fn seconds(&self, value: i64) -> String {
        format!("{:.2}s", value as f64 * self.analyzer.period() as f64 / NANOS_PER_SECOND)
    }
}

fn percent(value: f64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        value * 100.0 / total as f64
    }
}

fn row(f: &mut fmt::Formatter<'_>, columns: [&str; 5], function: &str) -> fmt::Result {
    let [flat, flat_pct, sum_pct, cum, cum_pct] = columns;
    writeln!(f, "{flat:<8} {flat_pct:<7} {sum_pct:<7} {cum:<8} {cum_pct:<7}  {function}")
}

impl fmt::Display for HotspotReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile Summary:")?;
        writeln!(f, "----------------")?;
        writeln!(
            f,
            "Sampling Period: {:.2} ms",
            self.analyzer.period() as f64 / NANOS_PER_MILLI
        )?;

        writeln!(f)?;
        writeln!(f, "Sample Types:")?;
        writeln!(f, "-------------")?;
        for (kind, unit) in self.analyzer.sample_types() {
            writeln!(f, "- {kind:<15} (unit: {unit})")?;
        }

        writeln!(f)?;
        writeln!(f, "Top {} Hotspots:", self.hotspots.len())?;
        writeln!(f, "---------------")?;
        row(f, ["flat", "flat%", "sum%", "cum", "cum%"], "Stack Trace")?;
        row(f, ["--------", "-------", "-------", "--------", "-------"], "----------")?;

        let total: i64 = self.hotspots.iter().map(|h| h.flat).sum();
        let mut running: f64 = 0.0;

        for hotspot in &self.hotspots {
            let flat_pct: f64 = percent(hotspot.flat as f64, total);
            running += flat_pct;

            let flat: String = self.seconds(hotspot.flat);
            let cum: String = self.seconds(hotspot.cum);
            let flat_pct: String = format!("{flat_pct:.2}%");
            let sum_pct: String = format!("{running:.2}%");
            let cum_pct: String = format!("{:.2}%", percent(hotspot.cum as f64, total));

            row(f, [&flat, &flat_pct, &sum_pct, &cum, &cum_pct], &hotspot.function)?;
        }

        Ok(())
    }
}
