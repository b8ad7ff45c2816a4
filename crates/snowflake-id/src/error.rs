use std::time::Duration;
use thiserror::Error;

pub type GeneratorResult<T> = core::result::Result<T, GeneratorError>;

/// Failures reported by [`SnowflakeGenerator::generate`](crate::SnowflakeGenerator::generate).
///
/// Out-of-range worker or datacenter values are not errors: they are logged and
/// reset when the generator is configured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Milliseconds elapsed since the epoch no longer fit the timestamp field.
    #[error(
        "epoch {epoch} is out of range at {now}: elapsed milliseconds must be between 0 and {max}"
    )]
    EpochExhausted { epoch: i64, now: i64, max: i64 },

    /// All sequence values of `timestamp` were used and the clock did not advance in time.
    #[error("sequence exhausted at {timestamp}: clock did not advance within {waited:?}")]
    SequenceExhausted { timestamp: i64, waited: Duration },

    #[error("clock moved backwards: last timestamp {last}, now {now}")]
    ClockMovedBackwards { last: i64, now: i64 },
}

impl GeneratorError {
    /// Returns `true` if retrying later cannot succeed for the current configuration.
    pub fn is_permanent(&self) -> bool {
        matches!(self, GeneratorError::EpochExhausted { now, epoch, .. } if now >= epoch)
    }
}
