
use std::sync::Arc;

use crate::{
    clock,
    zbce::{BinId, ZbceClient},
};

// The upstream intermittently returns an empty bin list; one retry covers it.
const LIST_BINS_ATTEMPTS: u32 = 2;

/// Ranking of monitored bins by current fullness.
///
/// Always sorted by fullness descending; ties are broken by bin id ascending
/// so the table is reproducible across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct FullnessTable {
    rows: Vec<(BinId, f64)>,
}

impl FullnessTable {
    /// Builds a table from `(bin_id, fullness)` pairs, sorting them into
    /// ranking order.
    pub fn new(mut rows: Vec<(BinId, f64)>) -> Self {
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { rows }
    }

    /// The ranked rows, most full first.
    pub fn rows(&self) -> &[(BinId, f64)] {
        &self.rows
    }

    /// Renders the ranking as a fixed-width text table with a header row.
    pub fn render(&self) -> String {
        let id_width = self
            .rows
            .iter()
            .map(|(id, _)| id.to_string().len())
            .chain(["bin_id".len()])
            .max()
            .unwrap_or("bin_id".len());

        let mut out = format!("{:<id_width$}  {:>8}\n", "bin_id", "fullness");
        out.push_str(&format!("{}  {}\n", "-".repeat(id_width), "-".repeat(8)));
        for (id, fullness) in &self.rows {
            out.push_str(&format!("{:<id_width$}  {:>8.1}\n", id.to_string(), fullness));
        }
        out
    }
}

/// Builds the daily fullness ranking from the telemetry API.
pub struct FullnessReporter {
    zbce: Arc<dyn ZbceClient>,
}

impl FullnessReporter {
    /// Creates a new reporter over the given telemetry client.
    pub fn new(zbce: Arc<dyn ZbceClient>) -> Self {
        Self { zbce }
    }

    /// Produces today's fullness ranking, or `None` when no bin yielded a
    /// reading.
    ///
    /// Per-bin failures are skipped; the report covers whatever subset of
    /// bins answered.
    pub async fn daily_report(&self) -> Option<FullnessTable> {
        let bins = self.list_bins_with_retry().await;
        if bins.is_empty() {
            tracing::warn!("Bin listing empty after retry; no fullness report");
            return None;
        }

        let (start, end) = clock::local_day_window();
        let mut rows = Vec::with_capacity(bins.len());

        for bin in bins {
            match self.zbce.fullness_between(&bin, start, end).await {
                // Readings arrive in chronological order; the last one is the
                // current fullness.
                Ok(readings) => match readings.last() {
                    Some(reading) => rows.push((bin, reading.fullness)),
                    None => tracing::debug!("No readings today for bin {bin}"),
                },
                Err(e) => {
                    tracing::debug!("Skipping bin {bin}: fullness fetch failed: {e}");
                }
            }
        }

        if rows.is_empty() {
            tracing::warn!("No bin yielded a reading today; no fullness report");
            return None;
        }

        Some(FullnessTable::new(rows))
    }

    async fn list_bins_with_retry(&self) -> Vec<BinId> {
        for attempt in 1..=LIST_BINS_ATTEMPTS {
            match self.zbce.list_bins().await {
                Ok(bins) if !bins.is_empty() => return bins,
                Ok(_) => {
                    tracing::warn!("Bin listing returned no bins (attempt {attempt})");
                }
                Err(e) => {
                    tracing::warn!("Bin listing failed (attempt {attempt}): {e}");
                }
            }
        }
        Vec::new()
    }
}
