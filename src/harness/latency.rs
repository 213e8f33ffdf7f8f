//! Submit→first-event latency recording for benches.
//!
//! Accumulates a histogram of request-to-ack latencies, backed by
//! `hdrhistogram` for this kind of wide-dynamic-range measurement.

use hdrhistogram::Histogram;

/// Records nanosecond latency samples and reports percentiles.
pub struct LatencyRecorder {
    histogram: Histogram<u64>,
}

impl LatencyRecorder {
    /// Tracks latencies from 1ns to 60s with 3 significant digits of
    /// precision, generous enough for both a hot matching-loop sample and
    /// a cold-start outlier.
    pub fn new() -> Self {
        Self {
            histogram: Histogram::new_with_bounds(1, 60_000_000_000, 3)
                .expect("1..60s with 3 significant digits is a valid histogram configuration"),
        }
    }

    pub fn record_nanos(&mut self, nanos: u64) {
        // Saturate rather than drop a sample that lands above the
        // configured upper bound.
        let _ = self.histogram.record(nanos.clamp(1, self.histogram.high()));
    }

    pub fn percentile(&self, p: f64) -> u64 {
        self.histogram.value_at_quantile(p / 100.0)
    }

    pub fn mean_nanos(&self) -> f64 {
        self.histogram.mean()
    }

    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }
}

impl Default for LatencyRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_percentiles_in_nondecreasing_order() {
        let mut recorder = LatencyRecorder::new();
        for nanos in [100, 200, 300, 10_000, 50_000] {
            recorder.record_nanos(nanos);
        }
        assert_eq!(recorder.len(), 5);
        assert!(recorder.percentile(50.0) <= recorder.percentile(99.0));
        assert!(recorder.percentile(99.0) <= recorder.percentile(99.9));
    }
}
