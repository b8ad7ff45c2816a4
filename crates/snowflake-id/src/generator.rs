//! Medium size, time-sortable, compact (64 bits) unique ids.
//! Use case: services needing high-throughput keys without a coordinator.
//! [ elapsed ms (41 bits) | datacenter (6 bits) | worker (4 bits) | sequence (12 bits) ]

use crate::clock::{Clock, SystemClock};
use crate::config::{checked_datacenter, checked_epoch, checked_worker};
use crate::error::{GeneratorError, GeneratorResult};
use crate::id_generator::IdGenerator;
use crate::layout::{self, SEQUENCE_MAX, TIMESTAMP_MAX};
use crate::{ClockRegressionPolicy, SnowflakeConfig, SnowflakeId};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

const REGRESSION_POLL_INTERVAL: Duration = Duration::from_micros(100);

#[derive(Debug)]
struct GeneratorState {
    config: SnowflakeConfig,
    /// Unix milliseconds of the most recent id.
    last_timestamp: i64,
    sequence: i64,
}

/// A Snowflake id generator producing 64-bit unique ids.
///
/// Ids are composed of:
/// - the milliseconds elapsed since a configurable epoch,
/// - a datacenter id and a worker id identifying this generator,
/// - a sequence number that increments within the same millisecond.
///
/// One lock guards the whole generation path and the setters, so any number of
/// threads can share a generator (directly or behind an `Arc`). When 4096 ids have
/// been issued in one millisecond the next caller spins until the clock advances,
/// holding the lock; that wait is bounded by
/// [`SnowflakeConfig::sequence_wait_limit`] (about one millisecond in practice).
///
/// Uniqueness across processes relies on each running generator having its own
/// `(datacenter, worker)` pair.
///
/// # Example
/// ```
/// use snowflake_id::{SnowflakeConfig, SnowflakeGenerator};
///
/// let generator = SnowflakeGenerator::new(SnowflakeConfig::new(4, 6, 1_687_752_676_742));
/// let first = generator.generate().unwrap();
/// let second = generator.generate().unwrap();
/// assert!(second > first);
/// assert_eq!(first.parts().worker, 4);
/// ```
#[derive(Debug)]
pub struct SnowflakeGenerator<C: Clock = SystemClock> {
    clock: C,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator<SystemClock> {
    pub fn new(config: SnowflakeConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for SnowflakeGenerator<SystemClock> {
    fn default() -> Self {
        Self::new(SnowflakeConfig::default())
    }
}

impl<C: Clock> SnowflakeGenerator<C> {
    /// Creates a generator reading time from `clock`.
    ///
    /// Worker, datacenter and epoch go through the same checks as the setters.
    pub fn with_clock(config: SnowflakeConfig, clock: C) -> Self {
        let now = clock.now_millis();
        let config = SnowflakeConfig {
            worker: checked_worker(config.worker),
            datacenter: checked_datacenter(config.datacenter),
            epoch: checked_epoch(config.epoch, now),
            ..config
        };
        tracing::debug!(
            worker = config.worker,
            datacenter = config.datacenter,
            epoch = config.epoch,
            clock_regression = ?config.clock_regression,
            "snowflake generator created"
        );
        Self {
            clock,
            state: Mutex::new(GeneratorState {
                config,
                last_timestamp: 0,
                sequence: 0,
            }),
        }
    }

    /// Sets the worker id. Values outside `0..=15` are logged and replaced by 0.
    pub fn set_worker(&self, worker: i64) {
        self.state.lock().config.worker = checked_worker(worker);
    }

    /// Sets the datacenter id. Values outside `0..=63` are logged and replaced by 0.
    ///
    /// Only the datacenter field is reset; the worker id is left as configured.
    pub fn set_datacenter(&self, datacenter: i64) {
        self.state.lock().config.datacenter = checked_datacenter(datacenter);
    }

    /// Sets the epoch (Unix milliseconds). A negative or future epoch is replaced by now.
    pub fn set_epoch(&self, epoch: i64) {
        let now = self.clock.now_millis();
        self.state.lock().config.epoch = checked_epoch(epoch, now);
    }

    pub fn set_clock_regression(&self, policy: ClockRegressionPolicy) {
        self.state.lock().config.clock_regression = policy;
    }

    /// Applies worker, datacenter and epoch in one step, as the individual setters would.
    pub fn configure(&self, worker: i64, datacenter: i64, epoch: i64) {
        let now = self.clock.now_millis();
        let mut state = self.state.lock();
        state.config.worker = checked_worker(worker);
        state.config.datacenter = checked_datacenter(datacenter);
        state.config.epoch = checked_epoch(epoch, now);
    }

    pub fn worker(&self) -> i64 {
        self.state.lock().config.worker
    }

    pub fn datacenter(&self) -> i64 {
        self.state.lock().config.datacenter
    }

    pub fn epoch(&self) -> i64 {
        self.state.lock().config.epoch
    }

    /// Snapshot of the effective configuration, after range checks.
    pub fn config(&self) -> SnowflakeConfig {
        self.state.lock().config.clone()
    }

    /// Unix milliseconds at which `id` was generated, using this generator's epoch.
    pub fn timestamp_millis(&self, id: SnowflakeId) -> i64 {
        id.timestamp_millis(self.epoch())
    }

    /// Generates the next id.
    ///
    /// # Errors
    /// - [`GeneratorError::EpochExhausted`] once the elapsed time since the epoch
    ///   no longer fits 41 bits (about 69 years after the epoch).
    /// - [`GeneratorError::SequenceExhausted`] if the sequence of the current
    ///   millisecond is used up and the clock does not advance within the limit.
    /// - [`GeneratorError::ClockMovedBackwards`] under the `Reject` and `Wait`
    ///   clock-regression policies.
    ///
    /// On error no id is produced and the generator state is unchanged.
    pub fn generate(&self) -> GeneratorResult<SnowflakeId> {
        self.next_id()
    }

    fn next_id(&self) -> GeneratorResult<SnowflakeId> {
        let mut state = self.state.lock();
        let last_timestamp = state.last_timestamp;
        let mut now = self.clock.now_millis();

        if now < last_timestamp {
            now = self.on_clock_regression(&state.config, last_timestamp, now)?;
        }

        let sequence = if now == last_timestamp {
            let sequence = (state.sequence + 1) & SEQUENCE_MAX;
            if sequence == 0 {
                // every sequence of this millisecond is taken
                now = self.wait_next_millis(last_timestamp, state.config.sequence_wait_limit())?;
            }
            sequence
        } else {
            0
        };

        let epoch = state.config.epoch;
        let elapsed = now - epoch;
        if !(0..=TIMESTAMP_MAX).contains(&elapsed) {
            return Err(GeneratorError::EpochExhausted {
                epoch,
                now,
                max: TIMESTAMP_MAX,
            });
        }

        state.last_timestamp = now;
        state.sequence = sequence;

        Ok(SnowflakeId::from_i64(layout::pack(
            elapsed,
            state.config.datacenter,
            state.config.worker,
            sequence,
        )))
    }

    fn wait_next_millis(&self, last_timestamp: i64, limit: Duration) -> GeneratorResult<i64> {
        tracing::trace!(last_timestamp, "sequence exhausted, waiting for next millisecond");
        let started = Instant::now();
        loop {
            // checked before reading the clock so a late read still wins
            let expired = started.elapsed() >= limit;
            let now = self.clock.now_millis();
            if now > last_timestamp {
                return Ok(now);
            }
            if expired {
                tracing::error!(last_timestamp, ?limit, "clock did not advance");
                return Err(GeneratorError::SequenceExhausted {
                    timestamp: last_timestamp,
                    waited: started.elapsed(),
                });
            }
            std::hint::spin_loop();
        }
    }

    fn on_clock_regression(
        &self,
        config: &SnowflakeConfig,
        last_timestamp: i64,
        now: i64,
    ) -> GeneratorResult<i64> {
        match config.clock_regression {
            ClockRegressionPolicy::Accept => {
                tracing::warn!(
                    last_timestamp,
                    now,
                    "clock moved backwards, ids may repeat or go out of order"
                );
                Ok(now)
            }
            ClockRegressionPolicy::Reject => {
                tracing::warn!(last_timestamp, now, "clock moved backwards, rejecting");
                Err(GeneratorError::ClockMovedBackwards {
                    last: last_timestamp,
                    now,
                })
            }
            ClockRegressionPolicy::Wait => {
                let limit = config.regression_wait_limit();
                let started = Instant::now();
                loop {
                    let expired = started.elapsed() >= limit;
                    let now = self.clock.now_millis();
                    if now >= last_timestamp {
                        return Ok(now);
                    }
                    if expired {
                        tracing::warn!(last_timestamp, now, ?limit, "clock did not catch up");
                        return Err(GeneratorError::ClockMovedBackwards {
                            last: last_timestamp,
                            now,
                        });
                    }
                    std::thread::sleep(REGRESSION_POLL_INTERVAL);
                }
            }
        }
    }
}

impl<T, C> IdGenerator<T> for SnowflakeGenerator<C>
where
    T: From<SnowflakeId>,
    C: Clock,
{
    fn generate(&self) -> GeneratorResult<T> {
        self.next_id().map(T::from)
    }
}
