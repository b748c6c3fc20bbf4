use hdrhistogram::Histogram;

use crate::error::MetricsError;

/// Request-latency histogram with three significant digits, the resolution
/// threshold evaluation depends on.
#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        let hist = Histogram::<u64>::new(3).map_err(|err| MetricsError::Histogram {
            message: format!("Failed to create histogram: {}", err),
        })?;
        Ok(Self { hist })
    }

    /// Record a latency value in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record(&mut self, latency_ms: u64) -> Result<(), MetricsError> {
        let value = latency_ms.max(1);
        self.hist.record(value).map_err(|err| MetricsError::Histogram {
            message: format!("Failed to record latency: {}", err),
        })
    }

    #[must_use]
    pub fn p95(&self) -> u64 {
        if self.count() == 0 {
            return 0;
        }
        self.hist.value_at_quantile(0.95)
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}
