use crate::layout::{DATACENTER_MAX, WORKER_MAX};
use std::time::Duration;

/// 2023-06-26T04:11:16.742Z
pub const DEFAULT_EPOCH: i64 = 1_687_752_676_742;
pub const DEFAULT_WORKER: i64 = 4;
pub const DEFAULT_DATACENTER: i64 = 6;
pub const DEFAULT_SEQUENCE_WAIT_LIMIT_US: u64 = 2_000;
pub const DEFAULT_REGRESSION_WAIT_LIMIT_US: u64 = 50_000;

/// What [`SnowflakeGenerator`](crate::SnowflakeGenerator) does when the clock
/// reports a time earlier than the last generated id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClockRegressionPolicy {
    /// Start a fresh sequence at the earlier time. Ids may repeat or go out of order.
    #[default]
    Accept,
    /// Fail with [`GeneratorError::ClockMovedBackwards`](crate::GeneratorError::ClockMovedBackwards).
    Reject,
    /// Sleep until the clock catches up, bounded by the regression wait limit.
    Wait,
}

/// Settings for a [`SnowflakeGenerator`](crate::SnowflakeGenerator).
///
/// Worker, datacenter and epoch are validated when applied, not here: values out of
/// range are logged and replaced (see [`SnowflakeGenerator::set_worker`](crate::SnowflakeGenerator::set_worker)).
///
/// # Example
/// ```
/// use snowflake_id::{ClockRegressionPolicy, SnowflakeConfig};
///
/// let config = SnowflakeConfig::default()
///     .with_worker(7)
///     .with_datacenter(12)
///     .with_clock_regression(ClockRegressionPolicy::Reject);
/// assert_eq!(config.worker, 7);
/// assert_eq!(config.epoch, snowflake_id::DEFAULT_EPOCH);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnowflakeConfig {
    pub worker: i64,
    pub datacenter: i64,
    /// Milliseconds since the Unix epoch.
    pub epoch: i64,
    pub clock_regression: ClockRegressionPolicy,
    /// Upper bound, in microseconds, on the wait for the next millisecond once a
    /// sequence is exhausted.
    pub sequence_wait_limit_us: u64,
    /// Upper bound, in microseconds, on the wait for a regressed clock under
    /// [`ClockRegressionPolicy::Wait`].
    pub regression_wait_limit_us: u64,
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        Self {
            worker: DEFAULT_WORKER,
            datacenter: DEFAULT_DATACENTER,
            epoch: DEFAULT_EPOCH,
            clock_regression: ClockRegressionPolicy::default(),
            sequence_wait_limit_us: DEFAULT_SEQUENCE_WAIT_LIMIT_US,
            regression_wait_limit_us: DEFAULT_REGRESSION_WAIT_LIMIT_US,
        }
    }
}

impl SnowflakeConfig {
    pub fn new(worker: i64, datacenter: i64, epoch: i64) -> Self {
        Self {
            worker,
            datacenter,
            epoch,
            ..Default::default()
        }
    }

    pub fn with_worker(mut self, worker: i64) -> Self {
        self.worker = worker;
        self
    }

    pub fn with_datacenter(mut self, datacenter: i64) -> Self {
        self.datacenter = datacenter;
        self
    }

    pub fn with_epoch(mut self, epoch: i64) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn with_clock_regression(mut self, policy: ClockRegressionPolicy) -> Self {
        self.clock_regression = policy;
        self
    }

    pub fn with_sequence_wait_limit(mut self, limit: Duration) -> Self {
        self.sequence_wait_limit_us = saturating_micros(limit);
        self
    }

    pub fn with_regression_wait_limit(mut self, limit: Duration) -> Self {
        self.regression_wait_limit_us = saturating_micros(limit);
        self
    }

    pub fn sequence_wait_limit(&self) -> Duration {
        Duration::from_micros(self.sequence_wait_limit_us)
    }

    pub fn regression_wait_limit(&self) -> Duration {
        Duration::from_micros(self.regression_wait_limit_us)
    }
}

fn saturating_micros(limit: Duration) -> u64 {
    u64::try_from(limit.as_micros()).unwrap_or(u64::MAX)
}

/// Returns `worker`, or 0 if it does not fit the worker field.
pub(crate) fn checked_worker(worker: i64) -> i64 {
    if !(0..=WORKER_MAX).contains(&worker) {
        tracing::error!(worker, "worker must be between 0 and {WORKER_MAX}, using 0");
        return 0;
    }
    worker
}

/// Returns `datacenter`, or 0 if it does not fit the datacenter field.
pub(crate) fn checked_datacenter(datacenter: i64) -> i64 {
    if !(0..=DATACENTER_MAX).contains(&datacenter) {
        tracing::error!(
            datacenter,
            "datacenter must be between 0 and {DATACENTER_MAX}, using 0"
        );
        return 0;
    }
    datacenter
}

/// Returns `epoch`, or `now` if the epoch is negative or in the future.
pub(crate) fn checked_epoch(epoch: i64, now: i64) -> i64 {
    if epoch < 0 || epoch > now {
        tracing::warn!(epoch, now, "epoch must be between 0 and now, using now");
        return now;
    }
    epoch
}
