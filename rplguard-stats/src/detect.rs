//! Flood-attack detection over the neighbor table.
//!
//! Two independent scans label outliers:
//! - DIO flooding: a population-statistics cutoff with a sensitivity
//!   factor fitted to the neighbor count.
//! - DIS flooding: a fixed absolute threshold.
//!
//! Both set sticky flags: an entry flagged once stays flagged until the
//! table is reset. DAO counts are collected but not scanned.

use crate::table::NeighborTable;

/// Absolute DIS count above which a neighbor is flagged.
pub const DIS_THRESHOLD: u32 = 3;

/// Quartic fit of the DIO cutoff sensitivity to the neighbor-population
/// size; larger populations get a wider tolerance band, lowering the
/// false-positive rate of small fluctuations.
fn sensitivity_factor(neighbors: usize) -> f64 {
    let n = neighbors as f64;
    -5e-5 * n.powi(4) + 0.0037 * n.powi(3) - 0.0899 * n.powi(2) + 0.9281 * n - 0.7903
}

impl NeighborTable {
    /// Scan for DIO flooders.
    ///
    /// Computes the population mean of the DIO counters and a spread term
    /// `sqrt(mean_over_i(2^(mean - count_i)))`; entries whose DIO count
    /// exceeds `mean + k * spread` are flagged, where `k` is the fitted
    /// sensitivity factor. Note the spread exponentiates the deviation in
    /// base 2 rather than squaring it; the cutoff model is calibrated
    /// against that term.
    ///
    /// An empty table is left untouched: with no population there is no
    /// distribution to compare against.
    pub fn check_dio_attackers(&mut self) {
        let n = self.neighbor_count();
        if n == 0 {
            return;
        }

        let mean = self
            .entries()
            .iter()
            .map(|e| f64::from(e.dio_count))
            .sum::<f64>()
            / n as f64;

        let spread = (self
            .entries()
            .iter()
            .map(|e| (mean - f64::from(e.dio_count)).exp2())
            .sum::<f64>()
            / n as f64)
            .sqrt();

        let cutoff = mean + sensitivity_factor(n) * spread;

        for entry in self.entries_mut() {
            if f64::from(entry.dio_count) > cutoff {
                entry.dio_attacker = true;
            }
        }
    }

    /// Scan for DIS flooders: any neighbor with more than
    /// [`DIS_THRESHOLD`] solicitations is flagged.
    pub fn check_dis_attackers(&mut self) {
        for entry in self.entries_mut() {
            if entry.dis_count > DIS_THRESHOLD {
                entry.dis_attacker = true;
            }
        }
    }
}
