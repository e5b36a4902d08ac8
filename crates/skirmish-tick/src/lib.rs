//! Fixed-interval tick scheduler for Skirmish.
//!
//! Drives the matchmaking pulse: once per interval the server takes the
//! matchmaker lock, pairs waiting players, and releases. One scheduler per
//! server — battle rooms themselves are turn-based and never tick.
//!
//! Overrun handling is skip-only: if a tick's work (plus scheduling
//! slack) runs past the next deadline, the scheduler reschedules from
//! now instead of firing a burst of catch-up ticks. Missing a
//! matchmaking pass costs waiting players one interval of latency;
//! running several passes back to back buys nothing.

use std::time::{Duration, Instant};

use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

/// Configuration for the matchmaking pulse.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Time between matchmaking passes.
    pub interval: Duration,
    /// Budget warning threshold (0.0–1.0). A warning is logged when a
    /// tick's recorded work exceeds this fraction of the interval.
    pub budget_warn_threshold: f64,
    /// Enable per-tick metrics collection.
    pub metrics_enabled: bool,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            budget_warn_threshold: 0.80,
            metrics_enabled: true,
        }
    }
}

impl TickConfig {
    /// Minimum supported interval. Anything shorter is clamped up.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Clamp any out-of-range values so the config is safe to use.
    /// Called automatically by [`TickScheduler::new`].
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(interval = ?self.interval, "tick interval below minimum, clamping");
            self.interval = Self::MIN_INTERVAL;
        }
        self.budget_warn_threshold = self.budget_warn_threshold.clamp(0.0, 1.0);
        self
    }
}

/// Information about a fired tick, returned by [`TickScheduler::wait_for_tick`].
#[derive(Debug, Clone)]
pub struct TickInfo {
    /// Monotonically increasing tick number (starts at 1).
    pub tick: u64,
    /// The configured interval, for callers that want elapsed-time logic.
    pub dt: Duration,
    /// `true` if this tick fired noticeably late.
    pub overrun: bool,
}

/// Runtime metrics, updated when `metrics_enabled` is set.
///
/// Timing values refer to the work reported between `wait_for_tick`
/// returning and [`TickScheduler::record_tick_end`].
#[derive(Debug, Clone, Default)]
pub struct TickMetrics {
    pub total_ticks: u64,
    pub total_overruns: u64,
    /// Exponential moving average of tick work time (α = 0.1).
    pub avg_tick_time: Duration,
    pub max_tick_time: Duration,
    /// Work time of the last recorded tick as a fraction of the interval.
    pub budget_utilization: f64,
}

/// Fixed-interval scheduler. Await [`wait_for_tick`](Self::wait_for_tick)
/// in a loop; call [`record_tick_end`](Self::record_tick_end) after each
/// pass to feed budget monitoring.
pub struct TickScheduler {
    config: TickConfig,
    tick_count: u64,
    next_tick: TokioInstant,
    /// Set by `wait_for_tick`, consumed by `record_tick_end`.
    tick_start: Option<Instant>,
    metrics: TickMetrics,
}

impl TickScheduler {
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        debug!(interval = ?config.interval, "tick scheduler created");
        Self {
            next_tick: TokioInstant::now() + config.interval,
            config,
            tick_count: 0,
            tick_start: None,
            metrics: TickMetrics::default(),
        }
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self::new(TickConfig::with_interval(interval))
    }

    /// Sleeps until the next tick is due.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let interval = self.config.interval;
        time::sleep_until(self.next_tick).await;

        let now = TokioInstant::now();
        self.tick_count += 1;
        self.tick_start = Some(Instant::now());

        let late_by = now.saturating_duration_since(self.next_tick);
        let overrun = late_by > interval / 10;
        if overrun {
            warn!(
                tick = self.tick_count,
                late_ms = late_by.as_secs_f64() * 1000.0,
                "tick fired late, rescheduling from now"
            );
            // Skip missed deadlines; never fire catch-up bursts.
            self.next_tick = now + interval;
        } else {
            self.next_tick += interval;
        }

        if self.config.metrics_enabled {
            self.metrics.total_ticks += 1;
            if overrun {
                self.metrics.total_overruns += 1;
            }
        }
        trace!(tick = self.tick_count, overrun, "tick fired");

        TickInfo {
            tick: self.tick_count,
            dt: interval,
            overrun,
        }
    }

    /// Records that the current tick's work has finished. Without this,
    /// budget warnings never fire. Calling it with no tick in flight is
    /// a no-op.
    pub fn record_tick_end(&mut self) {
        let Some(start) = self.tick_start.take() else {
            return;
        };
        let elapsed = start.elapsed();
        let budget = self.config.interval;
        let utilization = elapsed.as_secs_f64() / budget.as_secs_f64();

        if utilization >= self.config.budget_warn_threshold {
            warn!(
                tick = self.tick_count,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                budget_ms = budget.as_secs_f64() * 1000.0,
                "tick work approaching its budget"
            );
        }

        if self.config.metrics_enabled {
            self.metrics.budget_utilization = utilization;
            if elapsed > self.metrics.max_tick_time {
                self.metrics.max_tick_time = elapsed;
            }
            let alpha = 0.1;
            let prev = self.metrics.avg_tick_time.as_secs_f64();
            self.metrics.avg_tick_time =
                Duration::from_secs_f64(prev * (1.0 - alpha) + elapsed.as_secs_f64() * alpha);
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }
}
