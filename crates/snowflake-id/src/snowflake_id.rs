use crate::layout;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A 64-bit, time-sortable identifier.
///
/// Produced by [`SnowflakeGenerator`](crate::SnowflakeGenerator); ordering of the
/// integer value follows generation time, then sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SnowflakeId(i64);

/// The four fields packed into a [`SnowflakeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnowflakeParts {
    /// Milliseconds since the generator epoch.
    pub elapsed_millis: i64,
    pub datacenter: i64,
    pub worker: i64,
    pub sequence: i64,
}

impl SnowflakeParts {
    pub fn to_id(&self) -> SnowflakeId {
        SnowflakeId(layout::pack(
            self.elapsed_millis,
            self.datacenter,
            self.worker,
            self.sequence,
        ))
    }
}

impl SnowflakeId {
    /// Wraps a raw value, e.g. one read back from storage.
    pub const fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }

    pub const fn as_u64(self) -> u64 {
        self.0 as u64
    }

    pub fn parts(self) -> SnowflakeParts {
        let (elapsed_millis, datacenter, worker, sequence) = layout::unpack(self.0);
        SnowflakeParts {
            elapsed_millis,
            datacenter,
            worker,
            sequence,
        }
    }

    /// Unix time in milliseconds at which the id was generated, given the generator epoch.
    pub fn timestamp_millis(self, epoch: i64) -> i64 {
        epoch + self.parts().elapsed_millis
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SnowflakeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(SnowflakeId)
    }
}

impl From<SnowflakeParts> for SnowflakeId {
    fn from(parts: SnowflakeParts) -> Self {
        parts.to_id()
    }
}

impl From<SnowflakeId> for i64 {
    fn from(id: SnowflakeId) -> Self {
        id.as_i64()
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.as_u64()
    }
}

impl From<SnowflakeId> for String {
    fn from(id: SnowflakeId) -> Self {
        id.to_string()
    }
}
