use std::time::Duration;

pub const DEFAULT_TASKS_PER_WORKER: usize = 100;
const DEFAULT_IDLE_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Hard cap on threads. `None` uses the machine's available parallelism.
    pub max_workers: Option<usize>,
    pub tasks_per_worker: usize,
    /// How long a worker waits for work before it disposes its registry and exits.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_workers: None,
            tasks_per_worker: DEFAULT_TASKS_PER_WORKER,
            idle_timeout: Duration::from_millis(DEFAULT_IDLE_TIMEOUT_MS),
        }
    }
}

impl PoolConfig {
    /// Reads `CODEDIGEST_MAX_WORKERS`, `CODEDIGEST_TASKS_PER_WORKER` and
    /// `CODEDIGEST_IDLE_TIMEOUT_MS`. Missing or invalid values keep the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|&v| v > 0)
        };

        let defaults = Self::default();
        Self {
            max_workers: positive("CODEDIGEST_MAX_WORKERS").map(|v| v as usize),
            tasks_per_worker: positive("CODEDIGEST_TASKS_PER_WORKER")
                .map_or(defaults.tasks_per_worker, |v| v as usize),
            idle_timeout: positive("CODEDIGEST_IDLE_TIMEOUT_MS")
                .map_or(defaults.idle_timeout, Duration::from_millis),
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers.max(1));
        self
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Thread count for a batch: `max(1, min(cap, ceil(files / tasks_per_worker)))`.
    pub fn worker_count(&self, file_count: usize) -> usize {
        let cap = self.max_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        let wanted = file_count.div_ceil(self.tasks_per_worker.max(1));
        cap.min(wanted).max(1)
    }
}
