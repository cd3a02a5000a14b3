//! Run metrics and logging setup for the simulation.
//!
//! Provides structured logging and metrics tracking for monitoring
//! population trends and tick cost.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Ticks between `info!` summaries.
pub const SUMMARY_INTERVAL: u64 = 1000;

/// Collector for simulation statistics.
pub struct Metrics {
    tick_count: AtomicU64,
    prey_count: AtomicU64,
    predator_count: AtomicU64,
    food_count: AtomicU64,
    slowest_tick_us: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("tick_count", &self.tick_count())
            .field("prey_count", &self.prey_count())
            .field("predator_count", &self.predator_count())
            .finish_non_exhaustive()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            prey_count: AtomicU64::new(0),
            predator_count: AtomicU64::new(0),
            food_count: AtomicU64::new(0),
            slowest_tick_us: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration and the populations it left.
    pub fn record_tick(&self, duration: Duration, prey: usize, predators: usize, food: usize) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        self.prey_count.store(prey as u64, Ordering::Relaxed);
        self.predator_count.store(predators as u64, Ordering::Relaxed);
        self.food_count.store(food as u64, Ordering::Relaxed);
        self.slowest_tick_us
            .fetch_max(duration.as_micros() as u64, Ordering::Relaxed);

        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick % SUMMARY_INTERVAL == 0 {
            tracing::info!(
                tick,
                prey,
                predators,
                food,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    /// Adds `by` to a named counter.
    pub fn add_to_counter(&self, name: &str, by: u64) {
        if by == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(by, Ordering::Relaxed);
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    /// Current value of a named counter; zero if it was never touched.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn prey_count(&self) -> u64 {
        self.prey_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn predator_count(&self) -> u64 {
        self.predator_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_count(&self) -> u64 {
        self.food_count.load(Ordering::Relaxed)
    }

    /// Longest tick recorded so far.
    #[must_use]
    pub fn slowest_tick(&self) -> Duration {
        Duration::from_micros(self.slowest_tick_us.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs a simulation event.
    pub fn log_event(&self, event_type: &str, details: &str) {
        tracing::info!(event_type, details, "Simulation event");
    }
}

/// Installs a `tracing` subscriber honouring `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}
