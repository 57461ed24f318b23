//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Order in which job-count distributions are explored.
///
/// The optimum never depends on this order, only the amount of pruning does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionOrder {
    /// Distributions whose smallest count is largest come first, so balanced
    /// splits tighten the bound before skewed ones are visited.
    #[default]
    BalancedFirst,
    /// Lexicographically descending generation order.
    Generated,
}

/// Configuration of [`MinMaxSolver`](super::MinMaxSolver).
///
/// Deserializes from JSON; missing fields take their default value.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_makespan::search::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_parallel(true)
///     .with_time_limit(Duration::from_secs(5));
/// assert!(config.parallel());
/// assert!(config.pruning());
/// assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pruning: bool,
    parallel: bool,
    distribution_order: DistributionOrder,
    time_limit_secs: Option<f64>,
    check_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pruning: true,
            parallel: false,
            distribution_order: DistributionOrder::BalancedFirst,
            time_limit_secs: None,
            check_interval: 1024,
        }
    }
}

impl SolverConfig {
    /// Enables or disables the pruning guard.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Shards the search across the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the distribution exploration order.
    pub fn with_distribution_order(mut self, order: DistributionOrder) -> Self {
        self.distribution_order = order;
        self
    }

    /// Stops the search after the given wall-clock duration.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_secs = Some(limit.as_secs_f64());
        self
    }

    /// Number of orderings explored between two clock reads.
    pub fn with_check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval.max(1);
        self
    }

    /// Whether the pruning guard is active.
    pub fn pruning(&self) -> bool {
        self.pruning
    }

    /// Whether the search runs in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Distribution exploration order.
    pub fn distribution_order(&self) -> DistributionOrder {
        self.distribution_order
    }

    /// Wall-clock limit, if any. Negative or non-finite limits are ignored.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Number of orderings explored between two clock reads.
    pub fn check_interval(&self) -> u64 {
        self.check_interval.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = SolverConfig::default();
        assert!(c.pruning());
        assert!(!c.parallel());
        assert_eq!(c.distribution_order(), DistributionOrder::BalancedFirst);
        assert!(c.time_limit().is_none());
        assert_eq!(c.check_interval(), 1024);
    }

    #[test]
    fn test_deserialize_partial() {
        let c: SolverConfig = serde_json::from_str(
            r#"{"pruning": false, "distribution_order": "generated", "time_limit_secs": 1.5}"#,
        )
        .expect("valid json");
        assert!(!c.pruning());
        assert_eq!(c.distribution_order(), DistributionOrder::Generated);
        assert_eq!(c.time_limit(), Some(Duration::from_millis(1500)));
        assert_eq!(c.check_interval(), 1024);
    }

    #[test]
    fn test_negative_time_limit_ignored() {
        let c: SolverConfig =
            serde_json::from_str(r#"{"time_limit_secs": -1.0}"#).expect("valid json");
        assert!(c.time_limit().is_none());
    }

    #[test]
    fn test_check_interval_at_least_one() {
        assert_eq!(SolverConfig::default().with_check_interval(0).check_interval(), 1);
    }
}
