use std::time::Duration;
use tracing::{info, warn};

/// Outcome counters and per-iteration latencies for one or more virtual users.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub successes: usize,
    pub failures: usize,
    latencies_ms: Vec<u64>,
}

impl Summary {
    pub fn record(&mut self, elapsed: Duration, success: bool) {
        if success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.latencies_ms.push(elapsed.as_millis() as u64);
    }

    pub fn merge(mut self, other: Summary) -> Summary {
        self.successes += other.successes;
        self.failures += other.failures;
        self.latencies_ms.extend(other.latencies_ms);
        self
    }

    pub fn attempts(&self) -> usize {
        self.successes + self.failures
    }

    /// Nearest-rank percentile, `None` when nothing was recorded.
    pub fn percentile(&self, pct: f64) -> Option<u64> {
        if self.latencies_ms.is_empty() {
            return None;
        }
        let mut sorted = self.latencies_ms.clone();
        sorted.sort_unstable();
        let rank = ((pct.clamp(0.0, 100.0) / 100.0) * sorted.len() as f64).ceil() as usize;
        Some(sorted[rank.saturating_sub(1).min(sorted.len() - 1)])
    }

    pub fn log(&self) {
        info!(
            "📊 {} iterations: {} succeeded, {} failed",
            self.attempts(),
            self.successes,
            self.failures
        );
        match (self.percentile(0.0), self.percentile(50.0), self.percentile(95.0), self.percentile(100.0)) {
            (Some(min), Some(p50), Some(p95), Some(max)) => {
                info!("⏱️ latency ms: min={} p50={} p95={} max={}", min, p50, p95, max)
            }
            _ => warn!("No iterations were recorded"),
        }
    }
}
